//! 展示用格式化：home 目录缩写、最近使用日期

use std::path::Path;

use chrono::{Local, TimeZone};

/// 把位于 home 目录下的路径显示为 `~/...`
///
/// 只匹配完整的路径分量，`/home/user2` 不会被当作 `/home/user` 的子目录。
pub fn display_path(path: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    let home = home.trim_end_matches(std::path::MAIN_SEPARATOR);
    if home.is_empty() {
        return path.to_string();
    }
    match path.strip_prefix(home) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with(std::path::MAIN_SEPARATOR) => format!("~{}", rest),
        _ => path.to_string(),
    }
}

/// 使用当前用户的 home 目录格式化路径
pub fn display_path_for_user(path: &str) -> String {
    match dirs::home_dir() {
        Some(home) => display_path(path, &home),
        None => path.to_string(),
    }
}

/// 最近使用日期（本地时区），从未使用返回 "Never"
pub fn last_used_label(last_used_at: i64) -> String {
    if last_used_at <= 0 {
        return "Never".to_string();
    }
    match Local.timestamp_millis_opt(last_used_at).single() {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "Never".to_string(),
    }
}
