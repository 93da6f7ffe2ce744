//! Project Registry
//!
//! 对一次加载得到的 `ExtensionConfig` 的内存视图：搜索过滤、按最近使用排序、
//! 必填字段校验，以及更新 last_used_at。

use std::thread::{self, JoinHandle};

use chrono::Utc;
use tracing::{debug, warn};

use crate::storage::config::{ConfigStore, ExtensionConfig, Project};

/// 默认必填字段
pub const DEFAULT_REQUIRED_FIELDS: &[&str] = &["name", "path"];

/// 项目注册表
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    config: ExtensionConfig,
}

impl ProjectRegistry {
    pub fn new(config: ExtensionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn projects(&self) -> &[Project] {
        &self.config.projects
    }

    pub fn is_empty(&self) -> bool {
        self.config.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.config.find(id)
    }

    /// 按名称或路径过滤（不区分大小写），再按 last_used_at 降序稳定排序
    pub fn list(&self, search_text: &str) -> Vec<&Project> {
        let query = search_text.to_lowercase();
        let mut projects: Vec<&Project> = self
            .config
            .projects
            .iter()
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.path.to_lowercase().contains(&query)
            })
            .collect();
        // sort_by 是稳定排序，相同时间戳保持配置顺序
        projects.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));
        projects
    }

    /// 返回第一个缺少必填字段的项目
    ///
    /// 只识别 `name` 与 `path`，其它字段名忽略。
    pub fn validate<S: AsRef<str>>(&self, required_fields: &[S]) -> Option<&Project> {
        self.config
            .projects
            .iter()
            .find(|p| !missing_fields(p, required_fields).is_empty())
    }

    /// 把项目的 last_used_at 设为 `now`（仅内存）
    ///
    /// 返回是否找到该项目。
    pub fn touch(&mut self, id: &str, now: i64) -> bool {
        match self.config.projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                project.last_used_at = now;
                true
            }
            None => false,
        }
    }

    /// 更新内存中的时间戳，并在后台线程持久化
    ///
    /// 持久化失败只记录日志。
    pub fn touch_and_persist(&mut self, store: &ConfigStore, id: &str) -> Option<JoinHandle<()>> {
        let now = Utc::now().timestamp_millis();
        if !self.touch(id, now) {
            return None;
        }
        Some(spawn_touch(store.clone(), id.to_string(), now))
    }
}

/// 列出项目缺少的必填字段
pub fn missing_fields<S: AsRef<str>>(project: &Project, required_fields: &[S]) -> Vec<String> {
    required_fields
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| match *field {
            "name" => project.name.trim().is_empty(),
            "path" => project.path.trim().is_empty(),
            _ => false,
        })
        .map(str::to_string)
        .collect()
}

fn spawn_touch(store: ConfigStore, id: String, at: i64) -> JoinHandle<()> {
    thread::spawn(move || match store.touch_project(&id, at) {
        Ok(true) => debug!(id = %id, "last_used_at persisted"),
        Ok(false) => warn!(id = %id, "project vanished before last_used_at could be saved"),
        Err(e) => warn!(id = %id, error = %e, "failed to persist last_used_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, name: &str, path: &str, last_used_at: i64) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            last_used_at,
        }
    }

    fn registry(projects: Vec<Project>) -> ProjectRegistry {
        ProjectRegistry::new(ExtensionConfig {
            cli_path: "devtool".to_string(),
            projects,
        })
    }

    fn ids(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_list_sorts_most_recent_first() {
        let reg = registry(vec![
            project("a", "A", "/src/a", 1),
            project("b", "B", "/src/b", 2),
        ]);
        assert_eq!(ids(&reg.list("")), vec!["b", "a"]);
    }

    #[test]
    fn test_list_ties_keep_config_order() {
        let reg = registry(vec![
            project("a", "A", "/src/a", 5),
            project("b", "B", "/src/b", 9),
            project("c", "C", "/src/c", 5),
            project("d", "D", "/src/d", 0),
            project("e", "E", "/src/e", 5),
        ]);
        assert_eq!(ids(&reg.list("")), vec!["b", "a", "c", "e", "d"]);
    }

    #[test]
    fn test_list_filters_name_or_path_case_insensitive() {
        let reg = registry(vec![
            project("shop", "Shop Front", "/home/u/work/shop", 0),
            project("blog", "Blog", "/home/u/Personal/blog", 0),
            project("api", "API", "/srv/api", 0),
        ]);

        assert_eq!(ids(&reg.list("SHOP")), vec!["shop"]);
        assert_eq!(ids(&reg.list("personal")), vec!["blog"]);
        assert_eq!(ids(&reg.list("/home/u")), vec!["shop", "blog"]);
        assert!(reg.list("nothing-matches").is_empty());

        for query in ["o", "P", "/", "api"] {
            let q = query.to_lowercase();
            for p in reg.list(query) {
                assert!(
                    p.name.to_lowercase().contains(&q) || p.path.to_lowercase().contains(&q),
                    "{} should not match {}",
                    p.id,
                    query
                );
            }
        }
    }

    #[test]
    fn test_validate_finds_first_incomplete_project() {
        let reg = registry(vec![
            project("ok", "Ok", "/src/ok", 0),
            project("nopath", "No Path", "", 0),
            project("noname", "", "/src/x", 0),
        ]);
        let missing = reg.validate(DEFAULT_REQUIRED_FIELDS).unwrap();
        assert_eq!(missing.id, "nopath");

        // 只检查 name 时，缺 path 的项目不算缺失
        let missing = reg.validate(&["name"]).unwrap();
        assert_eq!(missing.id, "noname");
    }

    #[test]
    fn test_validate_none_when_complete_and_ignores_unknown_fields() {
        let reg = registry(vec![
            project("a", "A", "/src/a", 0),
            project("b", "B", "/src/b", 0),
        ]);
        assert!(reg.validate(DEFAULT_REQUIRED_FIELDS).is_none());
        assert!(reg.validate(&["name", "path", "icon", "branch"]).is_none());
        assert!(registry(vec![]).validate(DEFAULT_REQUIRED_FIELDS).is_none());
    }

    #[test]
    fn test_missing_fields_reports_each() {
        let p = project("x", "", "", 0);
        assert_eq!(
            missing_fields(&p, &["name", "path", "other"]),
            vec!["name".to_string(), "path".to_string()]
        );
    }

    #[test]
    fn test_touch_only_updates_matching_project() {
        let mut reg = registry(vec![
            project("a", "A", "/src/a", 1),
            project("b", "B", "/src/b", 2),
        ]);
        let before = reg.config().clone();

        assert!(reg.touch("a", 100));
        assert!(!reg.touch("zzz", 100));

        let a = reg.get("a").unwrap();
        assert_eq!(a.last_used_at, 100);
        assert_eq!(a.name, before.projects[0].name);
        assert_eq!(a.path, before.projects[0].path);
        assert_eq!(reg.get("b").unwrap(), &before.projects[1]);
        assert_eq!(reg.config().cli_path, before.cli_path);
        assert_eq!(ids(&reg.list("")), vec!["a", "b"]);
    }

    #[test]
    fn test_touch_and_persist_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));
        let config = ExtensionConfig {
            cli_path: "devtool".to_string(),
            projects: vec![project("a", "A", "/src/a", 1), project("b", "B", "/src/b", 2)],
        };
        store.save(&config).unwrap();

        let mut reg = ProjectRegistry::new(config);
        let handle = reg.touch_and_persist(&store, "a").unwrap();
        handle.join().unwrap();

        let in_memory = reg.get("a").unwrap().last_used_at;
        assert!(in_memory > 2);
        let saved = store.load().unwrap();
        assert_eq!(saved.find("a").unwrap().last_used_at, in_memory);
        assert_eq!(saved.find("b").unwrap().last_used_at, 2);

        assert!(reg.touch_and_persist(&store, "missing").is_none());
    }

    #[test]
    fn test_concurrent_touches_all_reach_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));
        let projects: Vec<Project> = (0..20)
            .map(|i| project(&format!("p{}", i), "P", "/src/p", 0))
            .collect();
        let config = ExtensionConfig {
            cli_path: "devtool".to_string(),
            projects,
        };
        store.save(&config).unwrap();

        let mut reg = ProjectRegistry::new(config);
        let handles: Vec<_> = (0..20)
            .map(|i| reg.touch_and_persist(&store, &format!("p{}", i)).unwrap())
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let saved = store.load().unwrap();
        assert_eq!(saved.projects.len(), 20);
        for p in &saved.projects {
            assert!(p.last_used_at > 0, "{} lost its touch", p.id);
            assert_eq!(p.last_used_at, reg.get(&p.id).unwrap().last_used_at);
        }
    }

    #[test]
    fn test_touch_persist_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // 指向目录而不是文件，读取会失败
        let store = ConfigStore::new(dir.path());
        let mut reg = registry(vec![project("a", "A", "/src/a", 1)]);

        let handle = reg.touch_and_persist(&store, "a").unwrap();
        assert!(handle.join().is_ok());
        assert!(reg.get("a").unwrap().last_used_at > 1);
    }
}
