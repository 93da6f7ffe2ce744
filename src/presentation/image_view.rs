//! 产物详情视图
//!
//! 图片引用带可选的显示宽高查询参数，例如 `/tmp/qr.png?width=300`。

use std::path::Path;

/// 默认导航标题
pub const DEFAULT_TITLE: &str = "projdeck";

/// 产物视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub image: String,
    pub navigation_title: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageView {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            navigation_title: DEFAULT_TITLE.to_string(),
            width: None,
            height: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.navigation_title = title.into();
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// 图片引用（带 width/height 查询参数，0 视为未设置）
    pub fn reference(&self) -> String {
        let mut params = Vec::new();
        if let Some(width) = self.width.filter(|w| *w > 0) {
            params.push(format!("width={}", width));
        }
        if let Some(height) = self.height.filter(|h| *h > 0) {
            params.push(format!("height={}", height));
        }

        if params.is_empty() {
            self.image.clone()
        } else {
            format!("{}?{}", self.image, params.join("&"))
        }
    }

    /// Markdown 图片语法
    pub fn markdown(&self) -> String {
        format!("![]({})", self.reference())
    }

    /// 产物文件是否存在
    pub fn artifact_exists(&self) -> bool {
        Path::new(&self.image).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_are_omitted() {
        let view = ImageView::new("/tmp/qr.png").with_width(0).with_height(120);
        assert_eq!(view.reference(), "/tmp/qr.png?height=120");

        let view = ImageView::new("/tmp/qr.png").with_width(0).with_height(0);
        assert_eq!(view.reference(), "/tmp/qr.png");
    }

    #[test]
    fn test_reference_without_params() {
        let view = ImageView::new("/tmp/qr.png");
        assert_eq!(view.reference(), "/tmp/qr.png");
        assert_eq!(view.markdown(), "![](/tmp/qr.png)");
        assert_eq!(view.navigation_title, DEFAULT_TITLE);
    }

    #[test]
    fn test_reference_with_width_only() {
        let view = ImageView::new("/tmp/qr.png").with_title("Shop").with_width(300);
        assert_eq!(view.reference(), "/tmp/qr.png?width=300");
        assert_eq!(view.navigation_title, "Shop");
    }

    #[test]
    fn test_reference_with_width_and_height() {
        let view = ImageView::new("/tmp/qr.png").with_height(200).with_width(300);
        assert_eq!(view.markdown(), "![](/tmp/qr.png?width=300&height=200)");
    }

    #[test]
    fn test_artifact_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");
        let view = ImageView::new(path.to_string_lossy());
        assert!(!view.artifact_exists());
        std::fs::write(&path, b"png").unwrap();
        assert!(view.artifact_exists());
    }
}
