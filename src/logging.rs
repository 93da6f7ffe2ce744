//! 日志初始化
//!
//! TUI 占用终端，日志写入 `~/.projdeck/projdeck.log`；其他命令写 stderr。
//! `RUST_LOG` 优先于 `--log-level`。

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::storage;

/// 日志输出位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// 默认日志文件
pub fn default_log_path() -> PathBuf {
    storage::app_dir().join("projdeck.log")
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// 初始化全局 subscriber（重复调用时忽略）
pub fn init(level: &str, target: LogTarget) {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    match target {
        LogTarget::Stderr => {
            let _ = registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .compact(),
                )
                .try_init();
        }
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                let _ = fs::create_dir_all(dir);
            }
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => {
                    let _ = registry
                        .with(
                            fmt::layer()
                                .with_writer(Mutex::new(file))
                                .with_ansi(false)
                                .with_target(true),
                        )
                        .try_init();
                }
                // 日志文件不可用时不输出，避免破坏 TUI
                Err(_) => {
                    let _ = registry
                        .with(fmt::layer().with_writer(std::io::sink))
                        .try_init();
                }
            }
        }
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
}
