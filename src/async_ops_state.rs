//! 异步操作状态管理
//!
//! 配置加载与外部 CLI 调用都放到后台线程执行，结果通过 mpsc 通道
//! 以 [`AppEvent`] 的形式交回 UI 主循环。每个后台任务只投递一次结果。
//!
//! - 加载结果带 generation，新的加载覆盖旧的（last-write-wins）
//! - 调用结果带导航 epoch，视图已离开时结果被丢弃
//! - 调用结果还带调用序号，只有最新发起的那次调用会被采纳

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::debug;

use crate::error::Result;
use crate::notification_state::Toast;
use crate::storage::config::{ConfigStore, ExtensionConfig};

/// 后台任务投递给主循环的事件
#[derive(Debug)]
pub enum AppEvent {
    /// 配置加载完成
    LoadFinished {
        generation: u64,
        result: Result<ExtensionConfig>,
    },
    /// 预览产物生成完成
    PreviewFinished {
        epoch: u64,
        invocation: u64,
        title: String,
        result: Result<PathBuf>,
    },
    /// open 命令执行完成
    OpenFinished {
        epoch: u64,
        invocation: u64,
        name: String,
        result: Result<()>,
    },
    /// 显示 Toast
    Toast(Toast),
    /// 配置被编辑器或外部修改
    ConfigChanged,
}

/// 导航 epoch：每次 push/pop 视图加一
///
/// UI 单线程持有，可被 action handler 克隆捕获。
#[derive(Debug, Clone, Default)]
pub struct NavEpoch(Rc<Cell<u64>>);

impl NavEpoch {
    pub fn current(&self) -> u64 {
        self.0.get()
    }

    pub fn bump(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.current() == epoch
    }
}

/// 调用序号：每发起一次 preview/open 加一，新调用取代旧调用
#[derive(Debug, Clone, Default)]
pub struct InvocationSeq(Rc<Cell<u64>>);

impl InvocationSeq {
    /// 发起一次新调用，返回它的序号
    pub fn issue(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    pub fn is_latest(&self, invocation: u64) -> bool {
        self.0.get() == invocation
    }
}

/// 异步操作状态
#[derive(Debug)]
pub struct AsyncOpsState {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
    nav_epoch: NavEpoch,
    invocations: InvocationSeq,
}

impl Default for AsyncOpsState {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncOpsState {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            nav_epoch: NavEpoch::default(),
            invocations: InvocationSeq::default(),
        }
    }

    /// 事件发送端（给 handler、watcher 使用）
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn nav_epoch(&self) -> NavEpoch {
        self.nav_epoch.clone()
    }

    pub fn invocations(&self) -> InvocationSeq {
        self.invocations.clone()
    }

    /// 在后台线程执行 job，并把结果投递回主循环
    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() -> AppEvent + Send + 'static,
    {
        spawn_with(self.tx.clone(), job);
    }

    /// 后台加载配置
    pub fn spawn_load(&self, store: ConfigStore, generation: u64) {
        debug!(generation, path = %store.path().display(), "starting config load");
        self.spawn(move || AppEvent::LoadFinished {
            generation,
            result: store.load(),
        });
    }

    /// 取出所有已到达的事件（不阻塞）
    pub fn drain(&self) -> Vec<AppEvent> {
        self.rx.try_iter().collect()
    }
}

/// 用指定发送端启动后台任务
pub fn spawn_with<F>(tx: Sender<AppEvent>, job: F)
where
    F: FnOnce() -> AppEvent + Send + 'static,
{
    thread::spawn(move || {
        // 接收端已关闭（应用退出）时直接丢弃结果
        let _ = tx.send(job());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_events(state: &AsyncOpsState, count: usize) -> Vec<AppEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.len() < count && Instant::now() < deadline {
            events.extend(state.drain());
            thread::sleep(Duration::from_millis(5));
        }
        events
    }

    #[test]
    fn test_spawn_delivers_single_result() {
        let state = AsyncOpsState::new();
        state.spawn(|| AppEvent::ConfigChanged);

        let events = wait_for_events(&state, 1);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AppEvent::ConfigChanged));
        assert!(state.drain().is_empty());
    }

    #[test]
    fn test_spawn_load_tags_generation() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));
        let state = AsyncOpsState::new();
        state.spawn_load(store, 7);

        let events = wait_for_events(&state, 1);
        match &events[0] {
            AppEvent::LoadFinished { generation, result } => {
                assert_eq!(*generation, 7);
                assert!(result.as_ref().unwrap().projects.is_empty());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_nav_epoch_shared_between_clones() {
        let state = AsyncOpsState::new();
        let epoch = state.nav_epoch();
        let captured = epoch.current();

        state.nav_epoch().bump();
        assert!(!epoch.is_current(captured));
        assert!(epoch.is_current(captured + 1));
    }

    #[test]
    fn test_newer_invocation_supersedes_older() {
        let state = AsyncOpsState::new();
        let seq = state.invocations();
        let first = seq.issue();
        let second = state.invocations().issue();

        assert!(second > first);
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }
}
