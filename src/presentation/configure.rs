//! 配置编辑视图
//!
//! 添加/删除项目、修改外部 CLI 路径。每次保存成功后由调用方发出
//! 配置变更通知，列表视图据此重新加载。

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::storage::config::{ConfigStore, ExtensionConfig, Project};
use crate::storage::expand_home;

/// 添加项目弹窗中当前聚焦的输入框
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Path,
    Name,
}

/// Add Project 弹窗数据
#[derive(Debug, Clone)]
pub struct AddProjectData {
    pub path: String,
    pub name: String,
    pub focus: AddField,
    /// 验证错误消息
    pub error: Option<String>,
}

impl AddProjectData {
    pub fn new() -> Self {
        Self {
            path: String::new(),
            name: String::new(),
            focus: AddField::Path,
            error: None,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AddField::Path => &mut self.path,
            AddField::Name => &mut self.name,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AddField::Path => AddField::Name,
            AddField::Name => AddField::Path,
        };
    }

    /// 名称留空时取目录名
    pub fn resolved_name(&self) -> String {
        let name = self.name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
        Path::new(&expand_home(&self.path))
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

impl Default for AddProjectData {
    fn default() -> Self {
        Self::new()
    }
}

/// 配置页弹窗
#[derive(Debug, Clone)]
pub enum ConfigDialog {
    AddProject(AddProjectData),
    CliPath { input: String, error: Option<String> },
    ConfirmRemove { id: String, name: String },
}

/// 保存成功的修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEdit {
    ProjectAdded(Project),
    ProjectRemoved(String),
    CliPathChanged(String),
}

impl ConfigEdit {
    /// 成功提示文本
    pub fn summary(&self) -> String {
        match self {
            Self::ProjectAdded(p) => format!("Added {}", p.name),
            Self::ProjectRemoved(name) => format!("Removed {}", name),
            Self::CliPathChanged(path) => format!("CLI path set to {}", path),
        }
    }
}

/// 配置编辑视图
#[derive(Debug)]
pub struct ConfigureView {
    store: ConfigStore,
    config: ExtensionConfig,
    selected: usize,
    pub dialog: Option<ConfigDialog>,
}

impl ConfigureView {
    /// 打开配置页（读取当前配置）
    pub fn open(store: ConfigStore) -> Result<Self> {
        let config = store.load()?;
        Ok(Self {
            store,
            config,
            selected: 0,
            dialog: None,
        })
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.config.projects.get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.config.projects.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.config.projects.len();
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }

    fn reload(&mut self) -> Result<()> {
        self.config = self.store.load()?;
        if self.selected >= self.config.projects.len() {
            self.selected = self.config.projects.len().saturating_sub(1);
        }
        Ok(())
    }

    // ========== 弹窗 ==========

    pub fn open_add_dialog(&mut self) {
        self.dialog = Some(ConfigDialog::AddProject(AddProjectData::new()));
    }

    pub fn open_cli_dialog(&mut self) {
        self.dialog = Some(ConfigDialog::CliPath {
            input: self.config.cli_path.clone(),
            error: None,
        });
    }

    /// 请求删除选中项目（需要确认）
    pub fn request_remove(&mut self) {
        if let Some(project) = self.selected_project() {
            let name = if project.name.is_empty() {
                project.id.clone()
            } else {
                project.name.clone()
            };
            self.dialog = Some(ConfigDialog::ConfirmRemove {
                id: project.id.clone(),
                name,
            });
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn input_char(&mut self, c: char) {
        match &mut self.dialog {
            Some(ConfigDialog::AddProject(data)) => {
                data.focused_mut().push(c);
                data.error = None;
            }
            Some(ConfigDialog::CliPath { input, error }) => {
                input.push(c);
                *error = None;
            }
            _ => {}
        }
    }

    pub fn delete_char(&mut self) {
        match &mut self.dialog {
            Some(ConfigDialog::AddProject(data)) => {
                data.focused_mut().pop();
                data.error = None;
            }
            Some(ConfigDialog::CliPath { input, error }) => {
                input.pop();
                *error = None;
            }
            _ => {}
        }
    }

    pub fn toggle_focus(&mut self) {
        if let Some(ConfigDialog::AddProject(data)) = &mut self.dialog {
            data.toggle_focus();
        }
    }

    /// 提交当前弹窗
    ///
    /// - `Ok(None)`：输入校验失败，弹窗保留并显示错误
    /// - `Ok(Some(edit))`：已保存
    /// - `Err`：保存失败，弹窗关闭
    pub fn submit(&mut self) -> Result<Option<ConfigEdit>> {
        let Some(dialog) = self.dialog.take() else {
            return Ok(None);
        };

        let edit = match dialog {
            ConfigDialog::AddProject(mut data) => {
                let path = expand_home(&data.path);
                if path.is_empty() {
                    data.error = Some("Path is required".to_string());
                    self.dialog = Some(ConfigDialog::AddProject(data));
                    return Ok(None);
                }
                if !Path::new(&path).is_dir() {
                    data.error = Some("Directory does not exist".to_string());
                    self.dialog = Some(ConfigDialog::AddProject(data));
                    return Ok(None);
                }
                if self.config.projects.iter().any(|p| p.path == path) {
                    data.error = Some("Project already registered".to_string());
                    self.dialog = Some(ConfigDialog::AddProject(data));
                    return Ok(None);
                }
                let name = data.resolved_name();
                ConfigEdit::ProjectAdded(self.store.add_project(&name, &path)?)
            }
            ConfigDialog::CliPath { input, .. } => {
                let input = input.trim();
                if input.is_empty() {
                    self.dialog = Some(ConfigDialog::CliPath {
                        input: String::new(),
                        error: Some("CLI path is required".to_string()),
                    });
                    return Ok(None);
                }
                self.store.set_cli_path(input)?;
                ConfigEdit::CliPathChanged(expand_home(input))
            }
            ConfigDialog::ConfirmRemove { id, name } => {
                self.store.remove_project(&id)?;
                ConfigEdit::ProjectRemoved(name)
            }
        };

        info!(edit = ?edit, "configuration saved");
        self.reload()?;
        Ok(Some(edit))
    }
}
