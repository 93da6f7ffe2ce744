//! 搜索框组件

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::ThemeColors;

/// 渲染搜索框，空查询时显示占位文本
pub fn render(frame: &mut Frame, area: Rect, query: &str, placeholder: &str, colors: &ThemeColors) {
    let mut spans = vec![Span::styled(" / ", Style::default().fg(colors.highlight))];

    if query.is_empty() {
        spans.push(Span::styled(placeholder, Style::default().fg(colors.muted)));
    } else {
        spans.push(Span::styled(query, Style::default().fg(colors.text)));
        spans.push(Span::styled(
            "█",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.bg_secondary));

    frame.render_widget(paragraph, area);
}
