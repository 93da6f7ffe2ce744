mod actions;
mod app;
mod async_ops_state;
mod cli;
mod error;
mod event;
mod invoker;
mod logging;
mod model;
mod notification_state;
mod presentation;
mod storage;
mod theme;
mod ui;
mod watcher;

use std::io;
use std::panic;
use std::process::ExitCode;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::info;

use actions::ProjectAction;
use app::App;
use cli::{commands, Cli, Commands};
use logging::LogTarget;
use storage::config::ConfigStore;
use theme::Theme;

/// 启动 TUI 界面
fn run_tui(store: ConfigStore, theme: Theme, action: ProjectAction) -> io::Result<()> {
    info!(config = %store.path().display(), ?action, "starting tui");

    // 初始化终端
    let mut terminal = ratatui::init();

    let mut app = App::new(store, theme, action);
    app.mount();

    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        // 检查后台操作结果
        app.poll_bg_result();

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => ConfigStore::new(storage::expand_home(&path.to_string_lossy())),
        None => ConfigStore::default_location(),
    };

    let command = cli.command.unwrap_or(Commands::Tui {
        action: ProjectAction::default(),
    });

    let log_target = match command {
        Commands::Tui { .. } => LogTarget::File(logging::default_log_path()),
        _ => LogTarget::Stderr,
    };
    logging::init(&cli.log_level, log_target);

    let mut stdout = io::stdout();
    let result = match command {
        Commands::Tui { action } => run_tui(store, cli.theme, action).map_err(error::AppError::from),
        Commands::List { search, json } => {
            commands::list(&store, search.as_deref().unwrap_or(""), json, &mut stdout)
        }
        Commands::Preview { id } => commands::preview(&store, &id, &mut stdout),
        Commands::Open { id } => commands::open(&store, &id, &mut stdout),
        Commands::Add { name, path } => commands::add(&store, &name, &path, &mut stdout),
        Commands::Remove { id } => commands::remove(&store, &id, &mut stdout),
        Commands::SetCli { path } => commands::set_cli(&store, &path, &mut stdout),
        Commands::ConfigPath => {
            println!("{}", store.path().display());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
