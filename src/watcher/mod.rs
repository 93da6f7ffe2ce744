//! 配置文件监听
//!
//! 监听配置文件所在目录（编辑器常用"写临时文件再重命名"的方式保存），
//! 命中配置文件的事件会合并后发送一次 `AppEvent::ConfigChanged`。

use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::async_ops_state::AppEvent;

/// 合并窗口：窗口内的多次修改只通知一次
const DEBOUNCE: Duration = Duration::from_millis(300);

/// 配置文件监听器，drop 时停止
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// 开始监听，目录不存在时会先创建
    pub fn start(config_path: &Path, events: Sender<AppEvent>) -> notify::Result<Self> {
        let target = config_path.to_path_buf();
        let dir = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "cannot create config dir for watching");
        }

        let (raw_tx, raw_rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                if let Ok(event) = res {
                    let _ = raw_tx.send(event);
                }
            },
            Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(path = %target.display(), "watching config file");

        thread::spawn(move || run_debounce_loop(raw_rx, target, events));

        Ok(Self { _watcher: watcher })
    }
}

/// 事件是否涉及配置文件内容变化
fn touches_config(event: &Event, target: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant
        && event
            .paths
            .iter()
            .any(|p| p == target || p.file_name() == target.file_name())
}

fn run_debounce_loop(raw_rx: Receiver<Event>, target: PathBuf, events: Sender<AppEvent>) {
    let mut pending_since: Option<Instant> = None;

    loop {
        let timeout = match pending_since {
            Some(since) => DEBOUNCE.saturating_sub(since.elapsed()),
            None => Duration::from_secs(3600),
        };

        match raw_rx.recv_timeout(timeout) {
            Ok(event) => {
                if touches_config(&event, &target) && pending_since.is_none() {
                    pending_since = Some(Instant::now());
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            // watcher 已被 drop
            Err(RecvTimeoutError::Disconnected) => return,
        }

        if pending_since.is_some_and(|since| since.elapsed() >= DEBOUNCE) {
            pending_since = None;
            debug!(path = %target.display(), "config file changed");
            if events.send(AppEvent::ConfigChanged).is_err() {
                return;
            }
        }
    }
}
