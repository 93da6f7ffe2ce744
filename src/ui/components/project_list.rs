//! 项目列表组件（居中样式）

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::truncate;
use crate::model::{display_path_for_user, last_used_label};
use crate::storage::config::Project;
use crate::theme::ThemeColors;

const NAME_WIDTH: usize = 24;
const PATH_WIDTH: usize = 40;

/// 渲染居中项目列表
pub fn render(
    frame: &mut Frame,
    area: Rect,
    projects: &[&Project],
    selected: usize,
    colors: &ThemeColors,
) {
    if projects.is_empty() {
        render_no_match(frame, area, colors);
        return;
    }

    // 超出高度时让选中行保持可见
    let rows = area.height.saturating_sub(2).max(1) as usize;
    let offset = selected.saturating_sub(rows - 1);

    let mut lines = Vec::new();

    // 标题行
    lines.push(Line::from(Span::styled(
        "─── Projects ───",
        Style::default().fg(colors.muted),
    )));
    lines.push(Line::from(""));

    for (i, project) in projects.iter().enumerate().skip(offset).take(rows) {
        let is_selected = i == selected;
        let cursor = if is_selected { "❯" } else { " " };
        let fg = if is_selected { colors.highlight } else { colors.text };

        let line = Line::from(vec![
            Span::styled(format!(" {}  ", cursor), Style::default().fg(fg)),
            Span::styled(
                format!("{:<width$}", truncate(&project.name, NAME_WIDTH), width = NAME_WIDTH),
                Style::default()
                    .fg(fg)
                    .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() }),
            ),
            Span::styled(
                format!(
                    "  {:<width$}",
                    truncate(&display_path_for_user(&project.path), PATH_WIDTH),
                    width = PATH_WIDTH
                ),
                Style::default().fg(colors.muted),
            ),
            Span::styled(
                format!("  {:>10}", last_used_label(project.last_used_at)),
                Style::default().fg(colors.muted),
            ),
        ]);

        lines.push(line);
    }

    // 计算居中位置
    let content_height = lines.len() as u16;
    let vertical_padding = area.height.saturating_sub(content_height) / 2;

    let [_, content_area, _] = Layout::vertical([
        Constraint::Length(vertical_padding),
        Constraint::Length(content_height),
        Constraint::Fill(1),
    ])
    .areas(area);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, content_area);
}

fn render_no_match(frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let [_, line_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let paragraph = Paragraph::new(Span::styled(
        "No matching projects",
        Style::default().fg(colors.muted),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, line_area);
}
