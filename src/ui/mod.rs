//! 界面渲染

pub mod about;
pub mod components;
pub mod configure;
pub mod image_view;
pub mod list;

use ratatui::{
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::{App, Screen};
use components::toast;

/// 渲染当前顶层页面和 Toast
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    match app.top() {
        None => list::render(frame, &app.list, colors),
        Some(Screen::Configure(view)) => configure::render(frame, view, colors),
        Some(Screen::Image(view)) => image_view::render(frame, view, colors),
        Some(Screen::About) => about::render(frame, app.store.path(), app.theme, colors),
    }

    if let Some(t) = app.notifications.current() {
        toast::render(frame, t, colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ProjectAction;
    use crate::notification_state::Toast;
    use crate::presentation::ImageView;
    use crate::storage::config::{ConfigStore, ExtensionConfig, Project};
    use crate::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(projects: Vec<Project>) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));
        let config = ExtensionConfig {
            cli_path: String::new(),
            projects,
        };
        let mut app = App::new(store, Theme::Dark, ProjectAction::Preview);
        let generation = app.list.begin_load(crate::presentation::LoadReason::Mount);
        app.list.apply_load(generation, Ok(config));
        (dir, app)
    }

    #[test]
    fn test_render_ready_list() {
        let (_dir, app) = app_with(vec![
            Project::new("a", "Shop", "/srv/shop"),
            Project::new("b", "Blog", "/srv/blog"),
        ]);
        let screen = draw(&app, 120, 30);
        assert!(screen.contains("Shop"));
        assert!(screen.contains("Blog"));
        assert!(screen.contains("Preview Project"));
    }

    #[test]
    fn test_render_empty_and_missing_fields() {
        let (_dir, app) = app_with(vec![]);
        assert!(draw(&app, 100, 30).contains("No projects configured"));

        let (_dir, app) = app_with(vec![Project::new("a", "Shop", "")]);
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("Incomplete Configuration"));
        assert!(screen.contains("path"));
    }

    #[test]
    fn test_render_stacked_screens_and_toast() {
        let (_dir, mut app) = app_with(vec![]);
        app.push(Screen::Image(
            ImageView::new("/tmp/qr.png").with_title("Shop").with_width(300),
        ));
        app.show_toast(Toast::failure("Failed to Open"));
        let screen = draw(&app, 100, 30);
        assert!(screen.contains("/tmp/qr.png?width=300"));
        assert!(screen.contains("Failed to Open"));

        app.pop();
        app.open_about();
        assert!(draw(&app, 100, 40).contains("projdeck"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let (_dir, mut app) = app_with(vec![Project::new("a", "Shop", "/srv/shop")]);
        app.show_toast(Toast::animated("Generating QR Code..."));
        draw(&app, 4, 2);
        app.open_configure();
        draw(&app, 4, 2);
    }
}
