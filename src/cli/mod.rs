//! CLI 模块

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::actions::ProjectAction;
use crate::storage::config::CONFIG_ENV;
use crate::theme::Theme;

#[derive(Parser)]
#[command(name = "projdeck")]
#[command(version)]
#[command(about = "Launcher for previewing and opening registered projects")]
pub struct Cli {
    /// Path to the config file (defaults to ~/.projdeck/config.toml)
    #[arg(long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Color theme for the interactive list
    #[arg(long, global = true, value_enum, default_value_t = Theme::Auto)]
    pub theme: Theme,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive project list (default)
    Tui {
        /// Action run when a project is selected
        #[arg(long, value_enum, default_value_t = ProjectAction::Preview)]
        action: ProjectAction,
    },
    /// Print registered projects, most recently used first
    List {
        /// Case-insensitive filter on name or path
        search: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Generate a preview artifact and print its path
    Preview {
        /// Project id
        id: String,
    },
    /// Open a project with the external CLI
    Open {
        /// Project id
        id: String,
    },
    /// Register a project
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        path: String,
    },
    /// Remove a project
    Remove {
        /// Project id
        id: String,
    },
    /// Set the external CLI path
    SetCli {
        path: String,
    },
    /// Print the config file location
    ConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["projdeck"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.theme, Theme::Auto);
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["projdeck", "list", "shop", "--json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::List {
                search: Some("shop".to_string()),
                json: true
            })
        );

        let cli = Cli::try_parse_from(["projdeck", "tui", "--action", "open"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Tui {
                action: ProjectAction::Open
            })
        );

        let cli =
            Cli::try_parse_from(["projdeck", "add", "--name", "Shop", "--path", "/srv/shop"])
                .unwrap();
        assert!(matches!(cli.command, Some(Commands::Add { .. })));
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["projdeck", "set-cli", "/bin/dev", "--config", "/tmp/c.toml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(
            cli.command,
            Some(Commands::SetCli {
                path: "/bin/dev".to_string()
            })
        );
    }
}
