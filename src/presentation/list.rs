//! 项目列表视图状态机
//!
//! `Loading -> Empty | MissingFields | Ready`
//!
//! 视图本身不做 I/O：加载由调用方在后台执行，结果通过 [`ProjectListView::apply_load`]
//! 交回；选中项目后先 touch，再把项目与配置交给调用方注入的 handler。

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::{missing_fields, ProjectRegistry, DEFAULT_REQUIRED_FIELDS};
use crate::notification_state::Toast;
use crate::storage::config::{ConfigStore, ExtensionConfig, Project};

/// 选中项目后执行的动作，由调用方注入
pub type ProjectActionHandler = Box<dyn FnMut(&Project, &ExtensionConfig)>;

/// 列表阶段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    /// 没有配置任何项目（或首次加载失败）
    Empty,
    /// 有项目缺少必填字段
    MissingFields {
        project_id: String,
        project_name: String,
        missing: Vec<String>,
    },
    Ready,
}

/// 触发加载的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReason {
    /// 视图首次挂载
    Mount,
    /// 用户显式刷新
    Refresh,
    /// 配置被修改
    ConfigChanged,
}

/// 项目列表视图
pub struct ProjectListView {
    phase: ListPhase,
    /// 最近一次成功加载的数据
    registry: Option<ProjectRegistry>,
    search_text: String,
    selected: usize,
    required_fields: Vec<String>,
    action_title: String,
    on_action: ProjectActionHandler,
    /// 最近一次发起的加载
    issued_generation: u64,
    /// 最近一次应用的加载
    applied_generation: u64,
    in_flight: BTreeMap<u64, LoadReason>,
}

impl std::fmt::Debug for ProjectListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectListView")
            .field("phase", &self.phase)
            .field("search_text", &self.search_text)
            .field("selected", &self.selected)
            .field("action_title", &self.action_title)
            .field("issued_generation", &self.issued_generation)
            .field("applied_generation", &self.applied_generation)
            .finish_non_exhaustive()
    }
}

impl ProjectListView {
    pub fn new(action_title: impl Into<String>, on_action: ProjectActionHandler) -> Self {
        Self {
            phase: ListPhase::Loading,
            registry: None,
            search_text: String::new(),
            selected: 0,
            required_fields: DEFAULT_REQUIRED_FIELDS.iter().map(|s| s.to_string()).collect(),
            action_title: action_title.into(),
            on_action,
            issued_generation: 0,
            applied_generation: 0,
            in_flight: BTreeMap::new(),
        }
    }

    pub fn with_required_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.required_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn action_title(&self) -> &str {
        &self.action_title
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn config(&self) -> Option<&ExtensionConfig> {
        self.registry.as_ref().map(ProjectRegistry::config)
    }

    /// 是否有加载正在进行
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    // ========== 加载 ==========

    /// 进入 Loading，返回本次加载的 generation
    pub fn begin_load(&mut self, reason: LoadReason) -> u64 {
        self.issued_generation += 1;
        self.in_flight.insert(self.issued_generation, reason);
        self.phase = ListPhase::Loading;
        debug!(generation = self.issued_generation, ?reason, "list load started");
        self.issued_generation
    }

    /// 配置变更：重新加载，保留当前搜索文本
    pub fn on_config_changed(&mut self) -> u64 {
        self.begin_load(LoadReason::ConfigChanged)
    }

    /// 应用加载结果，返回需要显示的 Toast
    ///
    /// 比已应用结果更旧的加载会被丢弃。
    pub fn apply_load(&mut self, generation: u64, result: Result<ExtensionConfig>) -> Option<Toast> {
        let reason = self.in_flight.remove(&generation);
        if generation < self.applied_generation {
            debug!(generation, applied = self.applied_generation, "stale load result dropped");
            return None;
        }
        self.applied_generation = generation;
        // 更旧的加载已被本次结果取代
        self.in_flight = self.in_flight.split_off(&generation);

        let toast = match result {
            Ok(config) => {
                info!(generation, projects = config.projects.len(), "projects loaded");
                self.registry = Some(ProjectRegistry::new(config));
                match reason {
                    Some(LoadReason::Refresh) => Some(
                        Toast::success("Refreshed").with_message("Project list has been updated"),
                    ),
                    _ => None,
                }
            }
            Err(e) => {
                warn!(generation, error = %e, "failed to load projects");
                Some(Toast::failure("Failed to Load").with_message(e.to_string()))
            }
        };

        if !self.is_loading() {
            self.phase = self.classify();
        }
        self.clamp_selection();
        toast
    }

    /// 根据当前数据计算阶段
    fn classify(&self) -> ListPhase {
        let Some(registry) = &self.registry else {
            return ListPhase::Empty;
        };
        if registry.is_empty() {
            return ListPhase::Empty;
        }
        match registry.validate(self.required_fields.as_slice()) {
            Some(project) => ListPhase::MissingFields {
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                missing: missing_fields(project, self.required_fields.as_slice()),
            },
            None => ListPhase::Ready,
        }
    }

    // ========== 查询 ==========

    /// 当前可见的项目（过滤 + 排序）
    ///
    /// Loading 时继续显示上一次加载的数据。
    pub fn visible_projects(&self) -> Vec<&Project> {
        let Some(registry) = &self.registry else {
            return Vec::new();
        };
        let showing_rows = match self.phase {
            ListPhase::Ready => true,
            ListPhase::Loading => self.classify() == ListPhase::Ready,
            _ => false,
        };
        if showing_rows {
            registry.list(&self.search_text)
        } else {
            Vec::new()
        }
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.visible_projects().get(self.selected).copied()
    }

    // ========== 搜索 ==========

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.selected = 0;
    }

    pub fn search_push(&mut self, c: char) {
        self.search_text.push(c);
        self.selected = 0;
    }

    pub fn search_pop(&mut self) {
        self.search_text.pop();
        self.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_text.clear();
        self.selected = 0;
    }

    // ========== 选择 ==========

    /// 选中下一项
    pub fn select_next(&mut self) {
        let len = self.visible_projects().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let len = self.visible_projects().len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_projects().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// 执行主动作：touch 选中项目，然后交给 handler
    ///
    /// 对当前显示的行生效（Ready，或重新加载期间仍显示的上一次数据），
    /// 返回是否调用了 handler。
    pub fn activate_selected(&mut self, store: &ConfigStore) -> bool {
        let Some(id) = self.selected_project().map(|p| p.id.clone()) else {
            return false;
        };
        let Some(registry) = self.registry.as_mut() else {
            return false;
        };

        // 持久化在后台进行，失败只记日志
        let _ = registry.touch_and_persist(store, &id);

        let Some(project) = registry.get(&id).cloned() else {
            return false;
        };
        debug!(id = %project.id, action = %self.action_title, "dispatching project action");
        (self.on_action)(&project, registry.config());
        // touch 之后排序变化，选中项跟随到列表顶部
        self.selected = 0;
        true
    }
}
