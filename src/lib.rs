pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Converter, Event, IconResolver};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Prices,
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Interactive {
        amount: Option<String>,
        from: Option<String>,
        to: Option<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Token converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let source = providers::HttpPriceSource::new(config.prices_url())?;
    let icons = IconResolver::new(config.icons_base_url());
    let table = cli::load_prices(&source).await?;

    match command {
        AppCommand::Prices => cli::prices::run(&table, &icons),
        AppCommand::Convert { amount, from, to } => cli::convert::run(&table, &amount, &from, &to),
        AppCommand::Interactive { amount, from, to } => {
            let mut converter = Converter::new(table, icons);
            let initial = [
                from.map(Event::FromChanged),
                to.map(Event::ToChanged),
                amount.map(Event::AmountChanged),
            ];
            for event in initial.into_iter().flatten() {
                converter.apply(event);
            }

            let stdin = std::io::stdin();
            cli::interactive::run_session(&mut converter, stdin.lock(), &mut std::io::stdout())?;
        }
    }
    Ok(())
}
