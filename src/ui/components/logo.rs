use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

/// ASCII Art Logo - 5 行高
const LOGO: &[&str] = &[
    "█▀█ █▀█ █▀█ ░░█ █▀▄ █▀▀ █▀▀ █▄▀",
    "█▀▀ █▀▄ █▄█ █▄█ █▄▀ ██▄ █▄▄ █░█",
    "",
    "preview your projects",
    "",
];

/// Logo 的高度（行数）
pub const LOGO_HEIGHT: u16 = LOGO.len() as u16;

/// 渲染居中的 Logo
pub fn render(frame: &mut Frame, area: Rect, colors: &ThemeColors) {
    let logo_lines: Vec<Line> = LOGO
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let color = if i < 2 { colors.highlight } else { colors.muted };
            Line::from(Span::styled(*line, Style::default().fg(color)))
        })
        .collect();

    let logo_widget = Paragraph::new(logo_lines).alignment(Alignment::Center);

    frame.render_widget(logo_widget, area);
}
