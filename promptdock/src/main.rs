//! Promptdock - a plugin-based terminal shell
//!
//! This is the main entry point for the promptdock CLI.

mod builtin;
mod shell;

use anyhow::Context;
use clap::{Parser, Subcommand};
use promptdock_core::config::{ConfigLoader, ShellConfig};
use promptdock_plugin::PluginLoader;
use promptdock_prompts::{HistoryStore, Ledger};
use promptdock_reader::{ContentWalker, ExclusionSettings};
use shell::Shell;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Promptdock - folder dumps and prompt history from a plugin shell
#[derive(Parser)]
#[command(name = "promptdock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (JSON or TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Run,

    /// List the plugins that load and their menu actions
    Plugins,

    /// Print the text of a folder tree using the saved exclusions
    Scan {
        /// Folder to read
        dir: PathBuf,
    },

    /// Print the prompt history, most recent group first
    History,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref());
    let level = match (&config, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Ok(c), false) => c.logging.level.clone(),
        (Err(_), false) => "info".to_string(),
    };

    // Initialize tracing; logs go to stderr so stdout stays scriptable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let config = config.context("Failed to load configuration")?;
    tracing::debug!("Configuration: {:?}", config);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_shell(&config)?,

        Commands::Plugins => {
            let (shell, loaded) = load_shell(&config);
            for plugin in &loaded {
                let info = plugin.info();
                println!("{} ({}): {}", info.name, plugin.name, info.description);
            }
            println!("{}", shell.menu_listing());
        }

        Commands::Scan { dir } => {
            anyhow::ensure!(dir.is_dir(), "Not a folder: {}", dir.display());
            let exclusions =
                ExclusionSettings::new(&config.reader.settings_file).load_with_defaults();
            println!("{}", ContentWalker::new(&exclusions).read_folder(&dir));
        }

        Commands::History => {
            let ledger = Ledger::open(HistoryStore::new(&config.prompts.history_file));
            println!("{}", ledger.render());
        }

        Commands::Version => {
            println!("Promptdock v{}", promptdock_core::VERSION);
        }
    }

    Ok(())
}

/// Build the host and load plugins into it
fn load_shell(config: &ShellConfig) -> (Shell, Vec<promptdock_plugin::LoadedPlugin>) {
    let registry = builtin::builtin_registry(config);
    let mut shell = Shell::new();
    let loaded = PluginLoader::new(&registry).load_from_dir(&config.plugin_dir, &mut shell);
    tracing::info!("🔌 {} plugin(s) loaded from {:?}", loaded.len(), config.plugin_dir);
    (shell, loaded)
}

fn run_shell(config: &ShellConfig) -> anyhow::Result<()> {
    tracing::info!("🚀 Starting promptdock v{}", promptdock_core::VERSION);
    let (mut shell, mut loaded) = load_shell(config);
    for plugin in &mut loaded {
        plugin.start();
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell
        .run(stdin.lock(), stdout.lock())
        .context("Shell I/O failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_run() {
        let cli = Cli::parse_from(["promptdock", "-v"]);
        assert!(cli.command.is_none());
        assert!(cli.verbose);

        let cli = Cli::parse_from(["promptdock", "scan", "src", "--config", "c.toml"]);
        assert!(matches!(cli.command, Some(Commands::Scan { .. })));
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_load_shell_registers_builtin_menus() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShellConfig {
            plugin_dir: dir.path().join("plugins"),
            reader: promptdock_core::config::ReaderConfig {
                settings_file: dir.path().join("settings.json"),
            },
            prompts: promptdock_core::config::PromptsConfig {
                history_file: dir.path().join("history.json"),
                paste_target: promptdock_core::config::PasteTarget::Input,
            },
            ..Default::default()
        };

        let (shell, loaded) = load_shell(&config);
        assert_eq!(loaded.len(), 2);
        assert_eq!(shell.panels().len(), 2);
        let actions = shell.actions();
        assert_eq!(actions[0], (1, "File Reader", "Show/Hide File Reader"));
        assert!(actions.contains(&(8, "Prompt Manager", "Confirm")));
    }
}
