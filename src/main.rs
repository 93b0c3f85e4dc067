use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratios::AppCommand;
use ratios::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show tracked ratios
    List,
    /// Track the price of one coin in units of another
    Add {
        /// Coin id of the numerator, e.g. "bitcoin"
        numerator: String,
        /// Coin id of the denominator, e.g. "ethereum"
        denominator: String,
    },
    /// Stop tracking the ratio at a listed position
    Remove {
        /// Position as shown by `list`, starting at 1
        position: usize,
    },
    /// Fetch current prices for every tracked ratio
    Refresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => match config_path {
            Some(path) => ratios::cli::setup::setup_at_path(path),
            None => ratios::cli::setup::setup(),
        },
        Some(Commands::List) => ratios::run_command(AppCommand::List, config_path).await,
        Some(Commands::Add {
            numerator,
            denominator,
        }) => {
            let command = AppCommand::Add {
                numerator,
                denominator,
            };
            ratios::run_command(command, config_path).await
        }
        Some(Commands::Remove { position }) => {
            ratios::run_command(AppCommand::Remove { position }, config_path).await
        }
        Some(Commands::Refresh) => ratios::run_command(AppCommand::Refresh, config_path).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
