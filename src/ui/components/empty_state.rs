//! 列表空状态 / 配置不完整提示

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

/// 没有任何项目
pub fn render_empty(frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(Span::styled(
            "No projects configured",
            Style::default().fg(colors.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Ctrl+O to open configuration",
            Style::default().fg(colors.muted),
        )),
        Line::from(Span::styled(
            "or run `projdeck add --name <NAME> --path <PATH>`",
            Style::default().fg(colors.muted),
        )),
    ];

    render_centered(frame, area, lines);
}

/// 某个项目缺少必填字段
pub fn render_missing_fields(
    frame: &mut Frame,
    area: Rect,
    project_name: &str,
    missing: &[String],
    colors: &ThemeColors,
) {
    let name = if project_name.is_empty() {
        "(unnamed)"
    } else {
        project_name
    };

    let lines = vec![
        Line::from(Span::styled(
            "Incomplete Configuration",
            Style::default()
                .fg(colors.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Project ", Style::default().fg(colors.muted)),
            Span::styled(name.to_string(), Style::default().fg(colors.text)),
            Span::styled(" is missing: ", Style::default().fg(colors.muted)),
            Span::styled(missing.join(", "), Style::default().fg(colors.warning)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter or Ctrl+O to open configuration",
            Style::default().fg(colors.muted),
        )),
    ];

    render_centered(frame, area, lines);
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    // 垂直居中
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
