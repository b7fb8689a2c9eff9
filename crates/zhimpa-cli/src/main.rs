use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use zhimpa_infrastructure::ConfigService;

mod commands;

#[derive(Parser)]
#[command(name = "zhimpa")]
#[command(about = "Zhimpa - session-gated recipe site, driven from the terminal", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/zhimpa/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a JSON lines command script
    Run {
        script: PathBuf,
        /// Page loaded before the first command
        #[arg(long, default_value = "index.html")]
        page: String,
    },
    /// Start an interactive session
    Repl {
        /// Page loaded on start
        #[arg(long, default_value = "index.html")]
        page: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = ConfigService::new(cli.config)?;
    let config = service.load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!("[Cli] Config loaded from {:?}", service.path());

    match cli.command {
        Commands::Run { script, page } => commands::run::execute(config, &script, &page)?,
        Commands::Repl { page } => commands::repl::start(config, &page)?,
        Commands::Config => commands::config::print(&config)?,
    }

    Ok(())
}
