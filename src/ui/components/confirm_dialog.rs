//! 确认弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::theme::ThemeColors;

/// 渲染删除项目确认弹窗
pub fn render_remove(frame: &mut Frame, project_name: &str, colors: &ThemeColors) {
    let message = vec![
        Line::from(format!("Remove \"{}\"?", project_name)),
        Line::from(""),
        Line::from("Only the configuration entry is"),
        Line::from("removed. Files stay on disk."),
    ];

    // 标题 + 边框 + 内容 + 提示
    let popup_height = message.len() as u16 + 4;
    let popup_area = centered_rect(frame.area(), 40, popup_height);

    // 清除背景
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Remove ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.warning))
        .style(Style::default().bg(colors.bg));

    let inner_area = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [content_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner_area);

    let content = Paragraph::new(message)
        .style(Style::default().fg(colors.text))
        .alignment(Alignment::Center);
    frame.render_widget(content, content_area);

    let key_style = Style::default()
        .fg(colors.highlight)
        .add_modifier(Modifier::BOLD);
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Y", key_style),
        Span::styled("/", Style::default().fg(colors.muted)),
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" confirm  ", Style::default().fg(colors.muted)),
        Span::styled("N", key_style),
        Span::styled("/", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}
