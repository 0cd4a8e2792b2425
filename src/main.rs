use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::log::init_logging;

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

impl From<Commands> for fxconv::AppCommand {
    fn from(cmd: Commands) -> fxconv::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                strict,
            } => fxconv::AppCommand::Convert {
                amount,
                from,
                to,
                strict,
            },
            Commands::Rates { filter } => fxconv::AppCommand::Rates { filter },
            Commands::Interactive => fxconv::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount to convert, up to 10000
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency code
        from: String,
        /// Target currency code
        to: String,
        /// Exit with an error when the input is invalid
        #[arg(long)]
        strict: bool,
    },
    /// List the loaded exchange rates
    Rates {
        /// Only show currencies starting with this prefix
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Open the interactive converter
    #[command(visible_alias = "ui")]
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(cmd) => fxconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
