//! 项目配置持久化
//!
//! `ExtensionConfig` 保存在一个 TOML 文件中（默认 `~/.projdeck/config.toml`）。
//! 文件位置由 [`ConfigStore`] 显式持有，每次加载都重新读取文件，
//! 不在进程内缓存。

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{app_dir, load_toml, save_toml};
use crate::error::{AppError, Result};

/// 环境变量：覆盖默认配置文件路径
pub const CONFIG_ENV: &str = "PROJDECK_CONFIG";

/// 用户配置的项目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// 唯一标识
    pub id: String,
    /// 显示名称
    #[serde(default)]
    pub name: String,
    /// 项目目录（绝对路径）
    #[serde(default)]
    pub path: String,
    /// 上次使用时间（Unix 毫秒，0 表示从未使用）
    #[serde(default)]
    pub last_used_at: i64,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            last_used_at: 0,
        }
    }
}

/// 配置文件结构
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// 外部 CLI 可执行文件路径
    #[serde(default)]
    pub cli_path: String,
    /// 项目列表（保持用户配置的顺序）
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ExtensionConfig {
    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// 配置文件读写
///
/// clone 出来的实例共享同一把写锁，所有读-改-写都在锁内完成。
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 持有写锁期间其它写入者等待（锁中毒时照常继续）
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 默认位置：`$PROJDECK_CONFIG`，否则 `~/.projdeck/config.toml`
    pub fn default_location() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::new(PathBuf::from(path)),
            _ => Self::new(app_dir().join("config.toml")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载配置（文件不存在则返回空配置）
    pub fn load(&self) -> Result<ExtensionConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "config file missing, using defaults");
            return Ok(ExtensionConfig::default());
        }
        let config: ExtensionConfig = load_toml(&self.path).map_err(|e| {
            AppError::config_load(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(
            path = %self.path.display(),
            projects = config.projects.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// 保存配置
    pub fn save(&self, config: &ExtensionConfig) -> Result<()> {
        let _guard = self.lock();
        save_toml(&self.path, config)
    }

    /// 更新单个项目的 last_used_at
    ///
    /// 返回是否找到该项目。
    pub fn touch_project(&self, id: &str, at: i64) -> Result<bool> {
        let _guard = self.lock();
        let mut config = self.load()?;
        let Some(project) = config.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        project.last_used_at = at;
        save_toml(&self.path, &config)?;
        Ok(true)
    }

    /// 添加项目（同一路径不可重复注册）
    pub fn add_project(&self, name: &str, path: &str) -> Result<Project> {
        let name = name.trim();
        let path = super::expand_home(path);
        if name.is_empty() {
            return Err(AppError::Validation {
                project: path,
                fields: vec!["name".to_string()],
            });
        }
        if path.is_empty() {
            return Err(AppError::Validation {
                project: name.to_string(),
                fields: vec!["path".to_string()],
            });
        }

        let _guard = self.lock();
        let mut config = self.load()?;
        if config.projects.iter().any(|p| p.path == path) {
            return Err(AppError::Duplicate(path));
        }

        let project = Project::new(uuid::Uuid::new_v4().to_string(), name, path);
        config.projects.push(project.clone());
        save_toml(&self.path, &config)?;
        info!(id = %project.id, name = %project.name, "project added");
        Ok(project)
    }

    /// 删除项目，返回是否存在
    pub fn remove_project(&self, id: &str) -> Result<bool> {
        let _guard = self.lock();
        let mut config = self.load()?;
        let before = config.projects.len();
        config.projects.retain(|p| p.id != id);
        if config.projects.len() == before {
            return Ok(false);
        }
        save_toml(&self.path, &config)?;
        info!(id, "project removed");
        Ok(true)
    }

    /// 设置外部 CLI 路径
    pub fn set_cli_path(&self, cli_path: &str) -> Result<()> {
        let _guard = self.lock();
        let mut config = self.load()?;
        config.cli_path = super::expand_home(cli_path);
        save_toml(&self.path, &config)
    }
}
