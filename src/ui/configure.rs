//! 配置编辑页面

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::components::{add_project_dialog, confirm_dialog, footer, truncate};
use crate::model::display_path_for_user;
use crate::presentation::{ConfigDialog, ConfigureView};
use crate::theme::ThemeColors;

/// 渲染配置页
pub fn render(frame: &mut Frame, view: &ConfigureView, colors: &ThemeColors) {
    let area = frame.area();

    let [cli_area, projects_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    render_cli_path(frame, cli_area, view, colors);
    render_projects(frame, projects_area, view, colors);

    footer::render(
        frame,
        footer_area,
        &[
            ("a", "add"),
            ("x", "remove"),
            ("c", "cli path"),
            ("j/k", "move"),
            ("Esc", "back"),
        ],
        colors,
    );

    match &view.dialog {
        Some(ConfigDialog::AddProject(data)) => {
            add_project_dialog::render_add_project(frame, data, colors)
        }
        Some(ConfigDialog::CliPath { input, error }) => {
            add_project_dialog::render_cli_path(frame, input, error.as_deref(), colors)
        }
        Some(ConfigDialog::ConfirmRemove { name, .. }) => {
            confirm_dialog::render_remove(frame, name, colors)
        }
        None => {}
    }
}

fn render_cli_path(frame: &mut Frame, area: Rect, view: &ConfigureView, colors: &ThemeColors) {
    let cli_path = &view.config().cli_path;
    let value = if cli_path.is_empty() {
        Span::styled("(not configured)", Style::default().fg(colors.warning))
    } else {
        Span::styled(display_path_for_user(cli_path), Style::default().fg(colors.text))
    };

    let block = Block::default()
        .title(" CLI ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::raw("  "), value])).block(block),
        area,
    );
}

fn render_projects(frame: &mut Frame, area: Rect, view: &ConfigureView, colors: &ThemeColors) {
    let projects = &view.config().projects;

    let block = Block::default()
        .title(format!(" Projects ({}) ", projects.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let lines: Vec<Line> = if projects.is_empty() {
        vec![Line::from(Span::styled(
            "  No projects yet. Press 'a' to add one.",
            Style::default().fg(colors.muted),
        ))]
    } else {
        projects
            .iter()
            .enumerate()
            .map(|(i, project)| {
                let is_selected = i == view.selected_index();
                let fg = if is_selected { colors.highlight } else { colors.text };
                let name = if project.name.trim().is_empty() {
                    Span::styled(format!("{:<24}", "(no name)"), Style::default().fg(colors.warning))
                } else {
                    Span::styled(
                        format!("{:<24}", truncate(&project.name, 24)),
                        Style::default().fg(fg).add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                    )
                };
                let path = if project.path.trim().is_empty() {
                    Span::styled("(no path)", Style::default().fg(colors.warning))
                } else {
                    Span::styled(
                        display_path_for_user(&project.path),
                        Style::default().fg(colors.muted),
                    )
                };

                Line::from(vec![
                    Span::styled(
                        if is_selected { " ❯ " } else { "   " },
                        Style::default().fg(fg),
                    ),
                    name,
                    Span::raw("  "),
                    path,
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
