use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Screen};
use crate::presentation::{ConfigDialog, ConfigureView, ListPhase};

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

/// Ctrl 或 Cmd
fn is_command(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if is_command(&key) && key.code == KeyCode::Char('q') {
        app.quit();
        return;
    }

    match app.top() {
        None => handle_list_key(app, key),
        Some(Screen::Configure(_)) => handle_configure_key(app, key),
        Some(Screen::Image(_)) => handle_image_key(app, key),
        Some(Screen::About) => handle_about_key(app, key),
    }
}

/// 项目列表
fn handle_list_key(app: &mut App, key: KeyEvent) {
    if is_command(&key) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('o') => app.open_configure(),
            KeyCode::Char('r') => app.refresh(),
            KeyCode::Char('c') => app.copy_selected_path(),
            KeyCode::Char('a') => app.open_about(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            if app.list.search_text().is_empty() {
                app.quit();
            } else {
                app.list.clear_search();
            }
        }
        KeyCode::F(1) => app.open_about(),
        KeyCode::Enter => match app.list.phase() {
            // 空列表或配置不完整时，Enter 直接进入配置页
            ListPhase::Empty | ListPhase::MissingFields { .. } => app.open_configure(),
            _ => app.activate_selected(),
        },
        KeyCode::Down => app.list.select_next(),
        KeyCode::Up => app.list.select_previous(),
        KeyCode::Backspace => app.list.search_pop(),
        KeyCode::Char(c) => app.list.search_push(c),
        _ => {}
    }
}

/// 配置页按键处理后需要 App 介入的动作
enum ConfigureOutcome {
    Handled,
    Submit,
    Back,
}

/// 配置页
fn handle_configure_key(app: &mut App, key: KeyEvent) {
    let Some(Screen::Configure(view)) = app.top_mut() else {
        return;
    };

    match configure_key(view, key) {
        ConfigureOutcome::Handled => {}
        ConfigureOutcome::Submit => app.submit_configure_dialog(),
        ConfigureOutcome::Back => {
            app.pop();
        }
    }
}

fn configure_key(view: &mut ConfigureView, key: KeyEvent) -> ConfigureOutcome {
    match &view.dialog {
        Some(ConfigDialog::ConfirmRemove { .. }) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                return ConfigureOutcome::Submit
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => view.cancel_dialog(),
            _ => {}
        },
        Some(_) => match key.code {
            KeyCode::Esc => view.cancel_dialog(),
            KeyCode::Enter => return ConfigureOutcome::Submit,
            KeyCode::Tab | KeyCode::BackTab => view.toggle_focus(),
            KeyCode::Backspace => view.delete_char(),
            KeyCode::Char(c) if !is_command(&key) => view.input_char(c),
            _ => {}
        },
        None => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return ConfigureOutcome::Back,
            KeyCode::Char('j') | KeyCode::Down => view.select_next(),
            KeyCode::Char('k') | KeyCode::Up => view.select_previous(),
            KeyCode::Char('a') => view.open_add_dialog(),
            KeyCode::Char('x') | KeyCode::Delete => view.request_remove(),
            KeyCode::Char('c') => view.open_cli_dialog(),
            _ => {}
        },
    }
    ConfigureOutcome::Handled
}

/// 产物页
fn handle_image_key(app: &mut App, key: KeyEvent) {
    let Some(Screen::Image(view)) = app.top() else {
        return;
    };
    let image = view.image.clone();

    match key.code {
        KeyCode::Char('c') if is_command(&key) => app.copy_to_clipboard(&image),
        KeyCode::Esc | KeyCode::Char('q') => {
            app.pop();
        }
        KeyCode::Char('o') | KeyCode::Enter => app.open_artifact(),
        _ => {}
    }
}

fn handle_about_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1)) {
        app.pop();
    }
}
