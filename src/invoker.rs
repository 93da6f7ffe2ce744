//! 外部 CLI 调用
//!
//! 约定：
//! - `<cli> preview <project_path> <project_id>`：成功时在 stdout 打印生成的产物路径
//! - `<cli> open <project_path>`
//!
//! 非零退出或无法启动均视为失败，不重试。

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, info};

use crate::error::{AppError, Result};

/// stderr 截取的最大行数
const STDERR_TAIL_LINES: usize = 5;

/// 生成预览产物，返回产物路径
///
/// 产物路径取 stdout 最后一个非空行；相对路径按项目目录解析。
pub fn preview(cli_path: &str, project_path: &str, project_id: &str) -> Result<PathBuf> {
    let output = run(cli_path, &["preview", project_path, project_id])?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let Some(line) = stdout.lines().map(str::trim).rev().find(|l| !l.is_empty()) else {
        return Err(AppError::invocation(format!(
            "{} preview printed no artifact path",
            program_name(cli_path)
        )));
    };

    let artifact = PathBuf::from(line);
    let artifact = if artifact.is_relative() {
        Path::new(project_path).join(artifact)
    } else {
        artifact
    };
    info!(artifact = %artifact.display(), project_id, "preview generated");
    Ok(artifact)
}

/// 用外部 CLI 打开项目
pub fn open(cli_path: &str, project_path: &str) -> Result<()> {
    run(cli_path, &["open", project_path])?;
    info!(project_path, "project opened");
    Ok(())
}

/// 执行外部命令，非零退出转换为 Invocation 错误
fn run(cli_path: &str, args: &[&str]) -> Result<Output> {
    let cli_path = cli_path.trim();
    if cli_path.is_empty() {
        return Err(AppError::invocation("CLI path is not configured"));
    }

    debug!(cli = cli_path, ?args, "invoking external cli");
    let output = Command::new(cli_path).args(args).output().map_err(|e| {
        AppError::invocation(format!("Failed to start {}: {}", cli_path, e))
    })?;

    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let tail = stderr_tail(&stderr);
    let status = match output.status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    };
    let message = if tail.is_empty() {
        format!("{} {} failed ({})", program_name(cli_path), args[0], status)
    } else {
        format!(
            "{} {} failed ({}): {}",
            program_name(cli_path),
            args[0],
            status,
            tail
        )
    };
    Err(AppError::invocation(message))
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" | ")
}

fn program_name(cli_path: &str) -> String {
    Path::new(cli_path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| cli_path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_empty_cli_path_fails() {
        let err = preview("  ", "/src/a", "a").unwrap_err();
        assert!(matches!(err, AppError::Invocation(_)));
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn test_missing_binary_fails_to_start() {
        let err = preview("/definitely/not/here/devtool", "/src/a", "a").unwrap_err();
        assert!(err.to_string().starts_with("Failed to start"));
    }

    #[cfg(unix)]
    #[test]
    fn test_preview_returns_last_stdout_line() {
        let dir = tempfile::tempdir().unwrap();
        let cli = write_script(
            dir.path(),
            "devtool",
            r#"echo "building $2 ($3)"
echo "/tmp/qrcode-$3.png"
echo """#,
        );

        let artifact = preview(&cli, "/src/shop", "shop-1").unwrap();
        assert_eq!(artifact, PathBuf::from("/tmp/qrcode-shop-1.png"));
    }

    #[cfg(unix)]
    #[test]
    fn test_preview_passes_arguments_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let cli = write_script(dir.path(), "devtool", r#"echo "/out/$1-$3""#);

        let artifact = preview(&cli, "/src/shop", "id9").unwrap();
        assert_eq!(artifact, PathBuf::from("/out/preview-id9"));
    }

    #[cfg(unix)]
    #[test]
    fn test_preview_relative_artifact_resolves_against_project() {
        let dir = tempfile::tempdir().unwrap();
        let cli = write_script(dir.path(), "devtool", "echo dist/qr.png");

        let artifact = preview(&cli, "/src/shop", "x").unwrap();
        assert_eq!(artifact, PathBuf::from("/src/shop/dist/qr.png"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_includes_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let cli = write_script(
            dir.path(),
            "devtool",
            "echo 'not logged in' >&2\nexit 3",
        );

        let err = preview(&cli, "/src/shop", "x").unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, AppError::Invocation(_)));
        assert!(msg.contains("devtool preview failed"));
        assert!(msg.contains("exit code 3"));
        assert!(msg.contains("not logged in"));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_stdout_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = write_script(dir.path(), "devtool", "exit 0");

        let err = preview(&cli, "/src/shop", "x").unwrap_err();
        assert!(err.to_string().contains("no artifact path"));
    }

    #[cfg(unix)]
    #[test]
    fn test_open_runs_open_subcommand() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("opened");
        let cli = write_script(
            dir.path(),
            "devtool",
            &format!(r#"[ "$1" = "open" ] && echo "$2" > "{}""#, marker.display()),
        );

        open(&cli, "/src/shop").unwrap();
        let written = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(written.trim(), "/src/shop");
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = "1\n2\n\n3\n4\n5\n6\n7\n";
        assert_eq!(stderr_tail(stderr), "3 | 4 | 5 | 6 | 7");
        assert_eq!(stderr_tail(""), "");
    }
}
