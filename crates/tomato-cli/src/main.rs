use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "tomato",
    version,
    about = "Pomodoro panel that keeps its tally in a markdown journal"
)]
struct Cli {
    /// Vault directory (default: journal.vault_dir from config, else the working directory)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,
    /// Config file (default: ~/.config/tomato/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive timer panel
    Panel {
        /// Print events as JSON lines instead of the rendered panel
        #[arg(long)]
        json: bool,
    },
    /// Daily completed-session counter
    Count {
        #[command(subcommand)]
        action: commands::count::CountAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TOMATO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "tomato", &mut std::io::stdout());
        return;
    }

    let result = commands::Context::load(cli.config, cli.vault).and_then(|ctx| match cli.command {
        Commands::Panel { json } => commands::panel::run(&ctx, json),
        Commands::Count { action } => commands::count::run(&ctx, action),
        Commands::Config { action } => commands::config::run(ctx, action),
        Commands::Completions { .. } => Ok(()),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
