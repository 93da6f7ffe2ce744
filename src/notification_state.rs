//! Toast 通知状态
//!
//! 同一时间只显示一条 Toast。Animated 风格用于进行中的操作，
//! 不会自动过期，需要被后续 Toast 替换或显式隐藏。

use std::time::{Duration, Instant};

/// Toast 默认显示时长
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Toast 风格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    /// 进行中（带 spinner）
    Animated,
    Success,
    Failure,
}

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: Option<String>,
    pub expires_at: Option<Instant>,
}

impl Toast {
    pub fn new(style: ToastStyle, title: impl Into<String>) -> Self {
        let expires_at = match style {
            ToastStyle::Animated => None,
            _ => Some(Instant::now() + TOAST_DURATION),
        };
        Self {
            style,
            title: title.into(),
            message: None,
            expires_at,
        }
    }

    pub fn animated(title: impl Into<String>) -> Self {
        Self::new(ToastStyle::Animated, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastStyle::Success, title)
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self::new(ToastStyle::Failure, title)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|at| Instant::now() >= at)
            .unwrap_or(false)
    }

    /// 单行显示文本
    pub fn text(&self) -> String {
        match &self.message {
            Some(message) => format!("{}: {}", self.title, message),
            None => self.title.clone(),
        }
    }
}

/// Notification 状态
#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<Toast>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 显示 Toast（替换当前的）
    pub fn show(&mut self, toast: Toast) {
        self.current = Some(toast);
    }

    /// 隐藏当前 Toast
    pub fn hide(&mut self) {
        self.current = None;
    }

    /// 只在当前是 Animated Toast 时隐藏
    pub fn hide_animated(&mut self) {
        if matches!(&self.current, Some(t) if t.style == ToastStyle::Animated) {
            self.current = None;
        }
    }

    /// 清理过期的 Toast
    pub fn update(&mut self) {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animated_toast_never_expires() {
        let toast = Toast::animated("Generating QR Code...");
        assert!(toast.expires_at.is_none());
        assert!(!toast.is_expired());
    }

    #[test]
    fn test_text_includes_message() {
        let toast = Toast::failure("Failed to Load").with_message("bad toml");
        assert_eq!(toast.text(), "Failed to Load: bad toml");
        assert_eq!(Toast::success("Refreshed").text(), "Refreshed");
    }

    #[test]
    fn test_expired_toast_is_cleared() {
        let mut state = NotificationState::new();
        let mut toast = Toast::success("Refreshed");
        toast.expires_at = Some(Instant::now() - Duration::from_millis(1));
        state.show(toast);

        state.update();
        assert!(state.current().is_none());
    }

    #[test]
    fn test_hide_animated_keeps_other_styles() {
        let mut state = NotificationState::new();
        state.show(Toast::failure("Failed"));
        state.hide_animated();
        assert!(state.current().is_some());

        state.show(Toast::animated("Working"));
        state.hide_animated();
        assert!(state.current().is_none());
    }
}
