pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::{OutputFormat, ui};
use crate::core::config::{AppConfig, MissingCurrencyPolicy};
use crate::core::{Aggregator, ResultSet, effective_days};
use crate::providers::PrivatBankFetcher;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

/// Settings for one invocation, as collected from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub days: i64,
    pub config_path: Option<String>,
    pub strict: bool,
    pub format: OutputFormat,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Fetches rates for `days` dates ending at `today` using the PrivatBank API.
pub async fn collect_rates(config: &AppConfig, days: i64, today: NaiveDate) -> Result<ResultSet> {
    let fetcher = PrivatBankFetcher::new();
    let aggregator = Aggregator::new(
        &fetcher,
        config.base_url(),
        &config.currencies,
        config.on_missing_currency,
    );

    let pb = ui::new_progress_bar(effective_days(days) as u64);
    pb.set_message("Fetching exchange rates...");
    let results = aggregator.run(days, today, &|| pb.inc(1)).await;
    pb.finish_and_clear();

    Ok(results?)
}

/// Runs the whole program and returns the rendered output.
pub async fn run(options: &RunOptions) -> Result<String> {
    info!("PrivatBank rates starting...");

    let mut config = load_config(options.config_path.as_deref())?;
    if options.strict {
        config.on_missing_currency = MissingCurrencyPolicy::Abort;
    }

    let today = Local::now().date_naive();
    let results = collect_rates(&config, options.days, today).await?;
    info!(records = results.len(), "Finished fetching exchange rates");

    cli::render(&results, &config.currencies, options.format)
}
