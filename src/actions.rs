//! 列表主动作（注入给 `ProjectListView` 的 handler）
//!
//! handler 只负责发起：显示进行中的 Toast，然后在后台调用外部 CLI。
//! 结果以 `AppEvent` 回到主循环，并带上发起时的导航 epoch 与调用序号。

use std::sync::mpsc::Sender;

use tracing::debug;

use crate::async_ops_state::{spawn_with, AppEvent, InvocationSeq, NavEpoch};
use crate::invoker;
use crate::notification_state::Toast;
use crate::presentation::ProjectActionHandler;
use crate::storage::config::{ExtensionConfig, Project};

/// 列表主动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProjectAction {
    /// 生成预览二维码并显示
    #[default]
    Preview,
    /// 用外部 CLI 打开项目
    Open,
}

impl ProjectAction {
    pub fn title(&self) -> &'static str {
        match self {
            ProjectAction::Preview => "Preview Project",
            ProjectAction::Open => "Open Project",
        }
    }

    /// 构造 handler
    pub fn handler(
        self,
        tx: Sender<AppEvent>,
        epoch: NavEpoch,
        invocations: InvocationSeq,
    ) -> ProjectActionHandler {
        match self {
            ProjectAction::Preview => preview_handler(tx, epoch, invocations),
            ProjectAction::Open => open_handler(tx, epoch, invocations),
        }
    }
}

/// 生成预览：完成后推入产物视图
pub fn preview_handler(
    tx: Sender<AppEvent>,
    epoch: NavEpoch,
    invocations: InvocationSeq,
) -> ProjectActionHandler {
    Box::new(move |project: &Project, config: &ExtensionConfig| {
        let _ = tx.send(AppEvent::Toast(Toast::animated("Generating QR Code...")));

        let dispatched = epoch.current();
        let invocation = invocations.issue();
        let cli_path = config.cli_path.clone();
        let project_path = project.path.clone();
        let project_id = project.id.clone();
        let title = project.name.clone();
        debug!(id = %project_id, epoch = dispatched, invocation, "preview requested");

        spawn_with(tx.clone(), move || AppEvent::PreviewFinished {
            epoch: dispatched,
            invocation,
            title,
            result: invoker::preview(&cli_path, &project_path, &project_id),
        });
    })
}

/// 打开项目
pub fn open_handler(
    tx: Sender<AppEvent>,
    epoch: NavEpoch,
    invocations: InvocationSeq,
) -> ProjectActionHandler {
    Box::new(move |project: &Project, config: &ExtensionConfig| {
        let _ = tx.send(AppEvent::Toast(Toast::animated(format!(
            "Opening {}...",
            project.name
        ))));

        let dispatched = epoch.current();
        let invocation = invocations.issue();
        let cli_path = config.cli_path.clone();
        let project_path = project.path.clone();
        let name = project.name.clone();

        spawn_with(tx.clone(), move || AppEvent::OpenFinished {
            epoch: dispatched,
            invocation,
            name,
            result: invoker::open(&cli_path, &project_path),
        });
    })
}
