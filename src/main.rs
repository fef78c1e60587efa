use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use tconv::core::log::{LogLevel, init_logging};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging (repeat for trace output)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tconv::AppCommand {
    fn from(cmd: Commands) -> tconv::AppCommand {
        match cmd {
            Commands::Prices => tconv::AppCommand::Prices,
            Commands::Convert { amount, from, to } => {
                tconv::AppCommand::Convert { amount, from, to }
            }
            Commands::Interactive { amount, from, to } => {
                tconv::AppCommand::Interactive { amount, from, to }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the latest price of every asset
    Prices,
    /// Convert an amount from one asset to another
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Asset to convert from, e.g. ETH
        from: String,
        /// Asset to convert to, e.g. USD
        to: String,
    },
    /// Start an interactive converter session
    Interactive {
        /// Initial amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// Initial asset to convert from
        #[arg(short, long)]
        from: Option<String>,
        /// Initial asset to convert to
        #[arg(short, long)]
        to: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogLevel::from_verbosity(cli.verbose));

    let result = match cli.command {
        Some(Commands::Setup) => tconv::cli::setup::setup(),
        Some(cmd) => tconv::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
