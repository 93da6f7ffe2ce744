//! projdeck 统一错误类型定义
//!
//! 使用 `thiserror` 提供统一的错误处理。所有错误都在 UI 边界被恢复为
//! 失败 Toast，CLI 下则打印到 stderr。

use std::io;
use thiserror::Error;

/// projdeck 错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置文件读取或解析失败
    #[error("Could not load project configuration: {0}")]
    ConfigLoad(String),

    /// 项目缺少必填字段
    #[error("Project \"{project}\" is missing required fields: {}", fields.join(", "))]
    Validation { project: String, fields: Vec<String> },

    /// 外部 CLI 调用失败
    #[error("{0}")]
    Invocation(String),

    /// I/O 错误（文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON 序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 资源不存在
    #[error("Not found: {0}")]
    NotFound(String),

    /// 同一路径已注册
    #[error("Project already registered: {0}")]
    Duplicate(String),
}

/// projdeck Result 类型别名
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// 创建 ConfigLoad 错误
    pub fn config_load(msg: impl Into<String>) -> Self {
        Self::ConfigLoad(msg.into())
    }

    /// 创建 Invocation 错误
    pub fn invocation(msg: impl Into<String>) -> Self {
        Self::Invocation(msg.into())
    }

    /// 创建 NotFound 错误
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Toast 标题，按错误类别区分
    pub fn title(&self) -> &'static str {
        match self {
            Self::ConfigLoad(_) | Self::TomlParse(_) => "Failed to Load",
            Self::Validation { .. } => "Incomplete Configuration",
            Self::Invocation(_) => "Command Failed",
            Self::NotFound(_) => "Not Found",
            Self::Duplicate(_) => "Already Registered",
            Self::Io(_) | Self::TomlSerialize(_) | Self::Json(_) => "Something Went Wrong",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::invocation("devtool exited with status 2");
        assert_eq!(err.to_string(), "devtool exited with status 2");

        let err = AppError::config_load("bad toml");
        assert_eq!(
            err.to_string(),
            "Could not load project configuration: bad toml"
        );
    }

    #[test]
    fn test_validation_lists_fields() {
        let err = AppError::Validation {
            project: "shop".to_string(),
            fields: vec!["name".to_string(), "path".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Project \"shop\" is missing required fields: name, path"
        );
        assert_eq!(err.title(), "Incomplete Configuration");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
