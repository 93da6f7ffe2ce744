//! 非交互子命令

use std::io::Write;

use chrono::Utc;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::invoker;
use crate::model::{
    display_path_for_user, last_used_label, missing_fields, ProjectRegistry,
    DEFAULT_REQUIRED_FIELDS,
};
use crate::storage::config::{ConfigStore, ExtensionConfig, Project};

/// 打印过滤后的项目列表
pub fn list(store: &ConfigStore, search: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let registry = ProjectRegistry::new(store.load()?);
    let projects = registry.list(search);

    if json {
        serde_json::to_writer_pretty(&mut *out, &projects)?;
        writeln!(out)?;
        return Ok(());
    }

    if projects.is_empty() {
        writeln!(out, "No projects found.")?;
        return Ok(());
    }

    for project in projects {
        writeln!(
            out,
            "{:<36}  {:<24}  {:<40}  {}",
            project.id,
            project.name,
            display_path_for_user(&project.path),
            last_used_label(project.last_used_at)
        )?;
    }
    Ok(())
}

/// 查找项目并校验必填字段，然后更新 last_used_at
fn prepare(store: &ConfigStore, id: &str) -> Result<(Project, ExtensionConfig)> {
    let config = store.load()?;
    let project = config
        .find(id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("project {}", id)))?;

    let missing = missing_fields(&project, DEFAULT_REQUIRED_FIELDS);
    if !missing.is_empty() {
        return Err(AppError::Validation {
            project: if project.name.is_empty() {
                project.id.clone()
            } else {
                project.name.clone()
            },
            fields: missing,
        });
    }

    if let Err(e) = store.touch_project(id, Utc::now().timestamp_millis()) {
        warn!(id, error = %e, "failed to persist last_used_at");
    }
    Ok((project, config))
}

/// 生成预览产物并打印路径
pub fn preview(store: &ConfigStore, id: &str, out: &mut impl Write) -> Result<()> {
    let (project, config) = prepare(store, id)?;
    let artifact = invoker::preview(&config.cli_path, &project.path, &project.id)?;
    writeln!(out, "{}", artifact.display())?;
    Ok(())
}

/// 用外部 CLI 打开项目
pub fn open(store: &ConfigStore, id: &str, out: &mut impl Write) -> Result<()> {
    let (project, config) = prepare(store, id)?;
    invoker::open(&config.cli_path, &project.path)?;
    writeln!(out, "Opened {}", project.name)?;
    Ok(())
}

pub fn add(store: &ConfigStore, name: &str, path: &str, out: &mut impl Write) -> Result<()> {
    let project = store.add_project(name, path)?;
    writeln!(out, "Added {} ({})", project.name, project.id)?;
    Ok(())
}

pub fn remove(store: &ConfigStore, id: &str, out: &mut impl Write) -> Result<()> {
    if !store.remove_project(id)? {
        return Err(AppError::not_found(format!("project {}", id)));
    }
    writeln!(out, "Removed {}", id)?;
    Ok(())
}

pub fn set_cli(store: &ConfigStore, path: &str, out: &mut impl Write) -> Result<()> {
    store.set_cli_path(path)?;
    writeln!(out, "CLI path set to {}", store.load()?.cli_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(projects: Vec<Project>, cli_path: &str) -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));
        store
            .save(&ExtensionConfig {
                cli_path: cli_path.to_string(),
                projects,
            })
            .unwrap();
        (dir, store)
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<String> {
        let mut buf = Vec::new();
        f(&mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_list_sorted_and_filtered() {
        let mut a = Project::new("a", "Alpha", "/srv/alpha");
        a.last_used_at = 1;
        let mut b = Project::new("b", "Beta", "/srv/beta");
        b.last_used_at = 2;
        let (_dir, store) = store_with(vec![a, b], "");

        let text = output(|out| list(&store, "", false, out)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("b "));
        assert!(lines[1].starts_with("a "));

        let text = output(|out| list(&store, "ALPHA", false, out)).unwrap();
        assert_eq!(text.lines().count(), 1);

        let text = output(|out| list(&store, "zzz", false, out)).unwrap();
        assert_eq!(text.trim(), "No projects found.");
    }

    #[test]
    fn test_list_json() {
        let (_dir, store) = store_with(vec![Project::new("a", "Alpha", "/srv/alpha")], "");
        let text = output(|out| list(&store, "", true, out)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["id"], "a");
        assert_eq!(value[0]["path"], "/srv/alpha");
    }

    #[test]
    fn test_preview_unknown_id() {
        let (_dir, store) = store_with(vec![], "");
        let err = output(|out| preview(&store, "nope", out)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_preview_rejects_incomplete_project() {
        let (_dir, store) = store_with(vec![Project::new("a", "Alpha", "")], "/bin/true");
        let err = output(|out| preview(&store, "a", out)).unwrap_err();
        match err {
            AppError::Validation { project, fields } => {
                assert_eq!(project, "Alpha");
                assert_eq!(fields, vec!["path".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_open_touches_before_invoking() {
        let (_dir, store) = store_with(vec![Project::new("a", "Alpha", "/srv/alpha")], "");
        // 未配置 CLI：调用失败，但 last_used_at 已更新
        let err = output(|out| open(&store, "a", out)).unwrap_err();
        assert!(matches!(err, AppError::Invocation(_)));
        assert!(store.load().unwrap().projects[0].last_used_at > 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_preview_prints_artifact() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("devtool");
        std::fs::write(&script, "#!/bin/sh\necho /tmp/qr-$3.png\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let (_cfg_dir, store) = store_with(
            vec![Project::new("a", "Alpha", "/srv/alpha")],
            &script.to_string_lossy(),
        );
        let text = output(|out| preview(&store, "a", out)).unwrap();
        assert_eq!(text.trim(), "/tmp/qr-a.png");
    }

    #[test]
    fn test_add_remove_set_cli() {
        let (_dir, store) = store_with(vec![], "");
        let text = output(|out| add(&store, "Alpha", "/srv/alpha", out)).unwrap();
        assert!(text.starts_with("Added Alpha"));

        let id = store.load().unwrap().projects[0].id.clone();
        output(|out| remove(&store, &id, out)).unwrap();
        assert!(store.load().unwrap().projects.is_empty());
        assert!(matches!(
            output(|out| remove(&store, &id, out)).unwrap_err(),
            AppError::NotFound(_)
        ));

        let text = output(|out| set_cli(&store, "/opt/dev", out)).unwrap();
        assert_eq!(text.trim(), "CLI path set to /opt/dev");
    }
}
