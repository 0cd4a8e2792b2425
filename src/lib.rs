pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::rates::{RateTable, RateTableProvider};
use anyhow::{Context, Result};
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
        strict: bool,
    },
    Rates {
        filter: Option<String>,
    },
    Interactive,
}

/// Fetches the rate table once. Any failure here is fatal to the command.
pub async fn load_table(provider: &dyn RateTableProvider, base: &str) -> Result<RateTable> {
    let pb = cli::ui::new_spinner("Fetching exchange rates...");
    let result = provider.fetch_table(base).await;
    pb.finish_and_clear();

    let table = result.context("Failed to load exchange rates")?;
    info!(
        base = table.base_code(),
        currencies = table.len(),
        "Exchange rates loaded"
    );
    Ok(table)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.provider.base_url,
        base_currency = %config.base_currency,
        "Loaded config"
    );

    let provider = providers::exchangerate_api::ExchangeRateApiProvider::new(
        &config.provider.base_url,
        &config.provider.api_key,
    );
    let table = load_table(&provider, &config.base_currency).await?;

    match command {
        AppCommand::Convert {
            amount,
            from,
            to,
            strict,
        } => cli::convert::run(&table, &amount, &from, &to, strict),
        AppCommand::Rates { filter } => cli::rates::run(&table, filter.as_deref()),
        AppCommand::Interactive => cli::interactive::run(&table),
    }
}
