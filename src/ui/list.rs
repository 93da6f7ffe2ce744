//! 项目列表页面

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};

use super::components::{empty_state, footer, logo, project_list, search_bar, toast};
use crate::presentation::{ListPhase, ProjectListView};
use crate::theme::ThemeColors;

/// 渲染项目列表页面
pub fn render(frame: &mut Frame, view: &ProjectListView, colors: &ThemeColors) {
    let area = frame.area();

    let [logo_area, search_area, status_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(logo::LOGO_HEIGHT + 1), // Logo
        Constraint::Length(1),                     // 搜索框
        Constraint::Length(1),                     // 加载状态
        Constraint::Fill(1),                       // 内容
        Constraint::Length(3),                     // Footer
    ])
    .areas(area);

    // Logo（带顶部间距）
    let [_, logo_inner] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(logo_area);
    logo::render(frame, logo_inner, colors);

    search_bar::render(
        frame,
        search_area,
        view.search_text(),
        "Search projects...",
        colors,
    );

    if view.is_loading() {
        render_loading_marker(frame, status_area, colors);
    }

    match view.phase() {
        ListPhase::Empty => empty_state::render_empty(frame, content_area, colors),
        ListPhase::MissingFields {
            project_name,
            missing,
            ..
        } => empty_state::render_missing_fields(frame, content_area, project_name, missing, colors),
        ListPhase::Ready | ListPhase::Loading => {
            let projects = view.visible_projects();
            // 首次加载时还没有数据
            if !(view.phase() == &ListPhase::Loading && projects.is_empty()) {
                project_list::render(
                    frame,
                    content_area,
                    &projects,
                    view.selected_index(),
                    colors,
                );
            }
        }
    }

    footer::render(frame, footer_area, &shortcuts(view), colors);
}

fn render_loading_marker(frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let marker = Paragraph::new(Span::styled(
        format!("{} Loading...", toast::spinner_frame()),
        Style::default().fg(colors.muted),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(marker, area);
}

fn shortcuts(view: &ProjectListView) -> Vec<(&str, &str)> {
    match view.phase() {
        ListPhase::Ready => vec![
            ("Enter", view.action_title()),
            ("⌃C", "copy path"),
            ("⌃R", "refresh"),
            ("⌃O", "configure"),
            ("F1", "about"),
            ("Esc", "quit"),
        ],
        ListPhase::Loading if view.selected_project().is_some() => vec![
            ("Enter", view.action_title()),
            ("⌃C", "copy path"),
            ("⌃O", "configure"),
            ("F1", "about"),
            ("Esc", "quit"),
        ],
        ListPhase::Loading => vec![("⌃O", "configure"), ("F1", "about"), ("Esc", "quit")],
        ListPhase::Empty | ListPhase::MissingFields { .. } => vec![
            ("Enter", "open configuration"),
            ("⌃R", "refresh"),
            ("F1", "about"),
            ("Esc", "quit"),
        ],
    }
}
