use std::path::PathBuf;

use tracing::{debug, warn};

use crate::actions::ProjectAction;
use crate::async_ops_state::{AppEvent, AsyncOpsState};
use crate::error::AppError;
use crate::notification_state::{NotificationState, Toast};
use crate::presentation::{ConfigureView, ImageView, LoadReason, ProjectListView};
use crate::storage::config::ConfigStore;
use crate::theme::{get_theme_colors, Theme, ThemeColors};
use crate::watcher::ConfigWatcher;

/// 产物视图的默认显示宽度
const PREVIEW_IMAGE_WIDTH: u32 = 300;

/// 压在列表之上的页面
#[derive(Debug)]
pub enum Screen {
    Configure(ConfigureView),
    Image(ImageView),
    About,
}

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 配置文件位置
    pub store: ConfigStore,
    /// 根页面：项目列表
    pub list: ProjectListView,
    /// 导航栈（不含根页面）
    pub stack: Vec<Screen>,
    /// Toast 提示
    pub notifications: NotificationState,
    /// 后台任务
    pub async_ops: AsyncOpsState,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// 配置文件监听（drop 时停止）
    _watcher: Option<ConfigWatcher>,
}

impl App {
    pub fn new(store: ConfigStore, theme: Theme, action: ProjectAction) -> Self {
        let async_ops = AsyncOpsState::new();
        let handler = action.handler(
            async_ops.sender(),
            async_ops.nav_epoch(),
            async_ops.invocations(),
        );
        let list = ProjectListView::new(action.title(), handler);

        Self {
            should_quit: false,
            store,
            list,
            stack: Vec::new(),
            notifications: NotificationState::new(),
            async_ops,
            theme,
            colors: get_theme_colors(theme),
            _watcher: None,
        }
    }

    /// 挂载：首次加载并开始监听配置文件
    pub fn mount(&mut self) {
        match ConfigWatcher::start(self.store.path(), self.async_ops.sender()) {
            Ok(watcher) => self._watcher = Some(watcher),
            Err(e) => warn!(error = %e, "config watcher unavailable"),
        }
        self.load(LoadReason::Mount);
    }

    fn load(&mut self, reason: LoadReason) {
        let generation = self.list.begin_load(reason);
        self.async_ops.spawn_load(self.store.clone(), generation);
    }

    /// 显式刷新
    pub fn refresh(&mut self) {
        self.load(LoadReason::Refresh);
    }

    /// 配置变更后重新加载（保留搜索文本）
    pub fn on_config_changed(&mut self) {
        self.load(LoadReason::ConfigChanged);
    }

    // ========== 导航 ==========

    /// 当前顶层页面（None 表示列表）
    pub fn top(&self) -> Option<&Screen> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Screen> {
        self.stack.last_mut()
    }

    pub fn push(&mut self, screen: Screen) {
        self.stack.push(screen);
        self.async_ops.nav_epoch().bump();
    }

    /// 返回上一页；已在列表时返回 false
    pub fn pop(&mut self) -> bool {
        if self.stack.pop().is_some() {
            self.async_ops.nav_epoch().bump();
            true
        } else {
            false
        }
    }

    pub fn open_configure(&mut self) {
        match ConfigureView::open(self.store.clone()) {
            Ok(view) => self.push(Screen::Configure(view)),
            Err(e) => self.show_error(&e),
        }
    }

    pub fn open_about(&mut self) {
        self.push(Screen::About);
    }

    // ========== 列表动作 ==========

    /// 主动作（Enter）
    pub fn activate_selected(&mut self) {
        let store = self.store.clone();
        self.list.activate_selected(&store);
    }

    /// 复制选中项目路径
    pub fn copy_selected_path(&mut self) {
        if let Some(path) = self.list.selected_project().map(|p| p.path.clone()) {
            self.copy_to_clipboard(&path);
        }
    }

    pub fn copy_to_clipboard(&mut self, text: &str) {
        let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string()));
        match result {
            Ok(()) => self.show_toast(Toast::success("Copied to Clipboard").with_message(text)),
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                self.show_toast(Toast::failure("Failed to Copy").with_message(e.to_string()));
            }
        }
    }

    // ========== 配置页 ==========

    /// 提交配置页弹窗
    pub fn submit_configure_dialog(&mut self) {
        let Some(Screen::Configure(view)) = self.stack.last_mut() else {
            return;
        };
        match view.submit() {
            Ok(Some(edit)) => {
                self.show_toast(Toast::success(edit.summary()));
                self.on_config_changed();
            }
            Ok(None) => {}
            Err(e) => self.show_error(&e),
        }
    }

    // ========== 产物页 ==========

    /// 用系统默认程序打开产物
    pub fn open_artifact(&mut self) {
        let Some(Screen::Image(view)) = self.stack.last() else {
            return;
        };
        let image = PathBuf::from(&view.image);
        if let Err(e) = open::that(&image) {
            self.show_toast(Toast::failure("Failed to Open").with_message(e.to_string()));
        }
    }

    // ========== 后台结果 ==========

    /// 处理所有已到达的后台事件
    pub fn poll_bg_result(&mut self) {
        for event in self.async_ops.drain() {
            self.handle_app_event(event);
        }
        self.notifications.update();
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoadFinished { generation, result } => {
                if let Some(toast) = self.list.apply_load(generation, result) {
                    self.show_toast(toast);
                }
            }
            AppEvent::PreviewFinished {
                epoch,
                invocation,
                title,
                result,
            } => {
                if !self.accepts_invocation(epoch, invocation) {
                    return;
                }
                match result {
                    Ok(path) => {
                        self.notifications.hide_animated();
                        let view = ImageView::new(path.to_string_lossy())
                            .with_title(title)
                            .with_width(PREVIEW_IMAGE_WIDTH);
                        self.push(Screen::Image(view));
                    }
                    Err(e) => self.show_toast(
                        Toast::failure("Failed to Preview Project").with_message(e.to_string()),
                    ),
                }
            }
            AppEvent::OpenFinished {
                epoch,
                invocation,
                name,
                result,
            } => {
                if !self.accepts_invocation(epoch, invocation) {
                    return;
                }
                match result {
                    Ok(()) => self.show_toast(Toast::success(format!("Opened {}", name))),
                    Err(e) => self.show_toast(
                        Toast::failure("Failed to Open Project").with_message(e.to_string()),
                    ),
                }
            }
            AppEvent::Toast(toast) => self.show_toast(toast),
            AppEvent::ConfigChanged => self.on_config_changed(),
        }
    }

    /// 调用结果是否仍然有效
    ///
    /// 发起后视图已离开：丢弃并收起进行中的 Toast。
    /// 已被更新的调用取代：丢弃，进行中的 Toast 留给新调用。
    fn accepts_invocation(&mut self, epoch: u64, invocation: u64) -> bool {
        if !self.async_ops.nav_epoch().is_current(epoch) {
            debug!(epoch, invocation, "invocation result for a closed view discarded");
            self.notifications.hide_animated();
            return false;
        }
        if !self.async_ops.invocations().is_latest(invocation) {
            debug!(invocation, "superseded invocation result discarded");
            return false;
        }
        true
    }

    // ========== Toast ==========

    pub fn show_toast(&mut self, toast: Toast) {
        self.notifications.show(toast);
    }

    pub fn show_error(&mut self, error: &AppError) {
        self.show_toast(Toast::failure(error.title()).with_message(error.to_string()));
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
