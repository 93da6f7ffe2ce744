//! 产物页面

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::components::footer;
use crate::presentation::ImageView;
use crate::theme::ThemeColors;

/// 渲染产物页
pub fn render(frame: &mut Frame, view: &ImageView, colors: &ThemeColors) {
    let area = frame.area();

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);

    let (status, status_color) = if view.artifact_exists() {
        ("✓ artifact ready", colors.success)
    } else {
        ("✗ artifact not found", colors.error)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            view.markdown(),
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Image  ", Style::default().fg(colors.muted)),
            Span::styled(view.reference(), Style::default().fg(colors.text)),
        ]),
        Line::from(Span::styled(status, Style::default().fg(status_color))),
    ];

    let block = Block::default()
        .title(format!(" {} ", view.navigation_title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(block),
        body_area,
    );

    footer::render(
        frame,
        footer_area,
        &[("o", "open image"), ("⌃C", "copy path"), ("Esc", "back")],
        colors,
    );
}
