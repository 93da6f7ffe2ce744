//! 关于 / 快捷键帮助

use std::path::Path;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::components::centered_rect;
use crate::theme::{Theme, ThemeColors};

/// 面板宽度
const PANEL_WIDTH: u16 = 56;

/// 渲染关于页
pub fn render(frame: &mut Frame, config_path: &Path, theme: Theme, colors: &ThemeColors) {
    let lines = build_lines(config_path, theme, colors);
    let panel_area = centered_rect(frame.area(), PANEL_WIDTH, lines.len() as u16 + 2);

    // 清除背景
    frame.render_widget(Clear, panel_area);

    let block = Block::default()
        .title(" About ")
        .title_style(
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    frame.render_widget(Paragraph::new(lines).block(block), panel_area);
}

fn build_lines(config_path: &Path, theme: Theme, colors: &ThemeColors) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("  projdeck v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(colors.text),
        )),
        Line::from(Span::styled(
            format!("  {}", config_path.display()),
            Style::default().fg(colors.muted),
        )),
        Line::from(Span::styled(
            format!("  Theme: {}", theme.label()),
            Style::default().fg(colors.muted),
        )),
        Line::from(""),
        section_header("Project List", colors),
        key_line("Enter", "Run primary action", colors),
        key_line("↑ / ↓", "Move selection", colors),
        key_line("type", "Filter by name or path", colors),
        key_line("Ctrl+C", "Copy project path", colors),
        key_line("Ctrl+R", "Refresh", colors),
        key_line("Ctrl+O", "Open configuration", colors),
        key_line("Esc", "Clear search / quit", colors),
        Line::from(""),
        section_header("Configuration", colors),
        key_line("a", "Add project", colors),
        key_line("x", "Remove project", colors),
        key_line("c", "Set CLI path", colors),
        Line::from(""),
        section_header("Other", colors),
        key_line("F1", "This view", colors),
        key_line("Ctrl+Q", "Quit", colors),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Esc to close",
            Style::default().fg(colors.muted),
        )),
    ]
}

/// 分组标题
fn section_header(title: &'static str, colors: &ThemeColors) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD),
    ))
}

/// 快捷键行
fn key_line(key: &'static str, desc: &'static str, colors: &ThemeColors) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:10}", key),
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(colors.muted)),
    ])
}
