//! 输入弹窗组件：Add Project / CLI Path

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::presentation::configure::{AddField, AddProjectData};
use crate::theme::ThemeColors;

/// 渲染 Add Project 弹窗
pub fn render_add_project(frame: &mut Frame, data: &AddProjectData, colors: &ThemeColors) {
    let fields = [
        ("  Path: ", data.path.as_str(), data.focus == AddField::Path),
        ("  Name: ", data.name.as_str(), data.focus == AddField::Name),
    ];
    let hint = [("Enter", " add  "), ("Tab", " next field  "), ("Esc", " cancel")];
    render_dialog(frame, " Add Project ", &fields, data.error.as_deref(), &hint, colors);
}

/// 渲染 CLI 路径弹窗
pub fn render_cli_path(frame: &mut Frame, input: &str, error: Option<&str>, colors: &ThemeColors) {
    let fields = [("  CLI: ", input, true)];
    let hint = [("Enter", " save  "), ("Esc", " cancel")];
    render_dialog(frame, " CLI Path ", &fields, error, &hint, colors);
}

fn render_dialog(
    frame: &mut Frame,
    title: &str,
    fields: &[(&str, &str, bool)],
    error: Option<&str>,
    hint: &[(&str, &str)],
    colors: &ThemeColors,
) {
    // 计算弹窗尺寸：边框 + 空行 + 字段 + (空行 + 错误) + 空行 + 提示
    let error_rows = if error.is_some() { 2 } else { 0 };
    let popup_height = 2 + 1 + fields.len() as u16 + error_rows + 2;
    let popup_area = centered_rect(frame.area(), 64, popup_height);

    // 清除背景
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner_area = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [_, fields_area, error_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(fields.len() as u16),
        Constraint::Length(error_rows),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner_area);

    let field_lines: Vec<Line> = fields
        .iter()
        .map(|(label, value, focused)| {
            let mut spans = vec![
                Span::styled(*label, Style::default().fg(colors.muted)),
                Span::styled(*value, Style::default().fg(colors.text)),
            ];
            if *focused {
                spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
            }
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(field_lines), fields_area);

    if let Some(error) = error {
        let error_line = Line::from(vec![
            Span::styled("  ✗ ", Style::default().fg(colors.error)),
            Span::styled(error, Style::default().fg(colors.error)),
        ]);
        frame.render_widget(Paragraph::new(vec![Line::from(""), error_line]), error_area);
    }

    let hint_spans: Vec<Span> = hint
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, Style::default().fg(colors.highlight)),
                Span::styled(*desc, Style::default().fg(colors.muted)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center),
        hint_area,
    );
}
