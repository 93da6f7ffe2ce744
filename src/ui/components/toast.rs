use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::notification_state::{Toast, ToastStyle};
use crate::theme::ThemeColors;

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// 在屏幕底部居中显示 Toast
pub fn render(frame: &mut Frame, toast: &Toast, colors: &ThemeColors) {
    let (display, border) = match toast.style {
        ToastStyle::Animated => (format!("{} {}", spinner_frame(), toast.text()), colors.highlight),
        ToastStyle::Success => (format!("✓ {}", toast.text()), colors.success),
        ToastStyle::Failure => (format!("✗ {}", toast.text()), colors.error),
    };

    let area = frame.area();
    if area.width < 8 || area.height < 6 {
        return;
    }

    // 计算 Toast 尺寸和位置
    let toast_width = (display.chars().count() + 6).min(area.width as usize - 4) as u16;
    let toast_height = 3;
    let toast_x = area.x + (area.width - toast_width) / 2;
    let toast_y = area.y + area.height - toast_height - 3;

    let toast_area = Rect::new(toast_x, toast_y, toast_width, toast_height);

    // 清除背景
    frame.render_widget(Clear, toast_area);

    let paragraph = Paragraph::new(display)
        .style(
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(colors.bg)),
        );

    frame.render_widget(paragraph, toast_area);
}

/// spinner 帧（基于时间，每 100ms 切换）
pub fn spinner_frame() -> char {
    let tick = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 100;
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}
