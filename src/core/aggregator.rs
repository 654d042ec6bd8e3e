//! Walks a range of past dates, fetching and collecting the rates for each.
use crate::core::config::MissingCurrencyPolicy;
use crate::core::error::ExtractionError;
use crate::core::fetcher::JsonFetcher;
use crate::core::rates::{CurrencyQuote, DailyRates, DateKey, RateRecord, ResultSet};
use chrono::{Duration, NaiveDate};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Upper bound on the number of days a single run may request.
pub const MAX_DAYS: i64 = 10;

const RATES_PATH: &str = "/p24api/exchange_rates";

/// Number of dates a run iterates over. Values above [`MAX_DAYS`] are clamped
/// and non-positive values yield no dates at all.
pub fn effective_days(requested: i64) -> i64 {
    requested.clamp(0, MAX_DAYS)
}

/// Dates from `today` backwards, most recent first.
pub fn date_keys(today: NaiveDate, days: i64) -> Vec<DateKey> {
    (0..effective_days(days))
        .map(|i| DateKey::from(today - Duration::days(i)))
        .collect()
}

/// Returns the first `exchangeRate` entry whose `currency` matches `code`.
fn find_entry<'a>(entries: &'a [Value], code: &str) -> Option<&'a Value> {
    entries
        .iter()
        .find(|entry| entry.get("currency").and_then(Value::as_str) == Some(code))
}

fn rate_field(entry: &Value, field: &str) -> Option<f64> {
    entry.get(field).and_then(Value::as_f64)
}

/// Builds the record for one date from a raw API response. Every currency in
/// `currencies` must be present with both rates.
pub fn extract_record(
    date: &DateKey,
    body: &Value,
    currencies: &[String],
) -> Result<RateRecord, ExtractionError> {
    let entries = body
        .get("exchangeRate")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut record = RateRecord::new();
    for code in currencies {
        let missing = |reason: &str| ExtractionError {
            date: date.to_string(),
            currency: code.clone(),
            reason: reason.to_string(),
        };

        let entry = find_entry(entries, code).ok_or_else(|| missing("currency not in response"))?;
        let sale = rate_field(entry, "saleRate").ok_or_else(|| missing("saleRate missing"))?;
        let purchase =
            rate_field(entry, "purchaseRate").ok_or_else(|| missing("purchaseRate missing"))?;

        record.insert(code, CurrencyQuote { sale, purchase });
    }
    Ok(record)
}

pub struct Aggregator<'a> {
    fetcher: &'a (dyn JsonFetcher + Send + Sync),
    base_url: String,
    currencies: Vec<String>,
    policy: MissingCurrencyPolicy,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        fetcher: &'a (dyn JsonFetcher + Send + Sync),
        base_url: &str,
        currencies: &[String],
        policy: MissingCurrencyPolicy,
    ) -> Self {
        Aggregator {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            currencies: currencies.to_vec(),
            policy,
        }
    }

    pub fn url_for(&self, date: &DateKey) -> String {
        format!("{}{}?date={}", self.base_url, RATES_PATH, date)
    }

    /// Fetches `requested_days` dates ending at `today`, one request at a time.
    ///
    /// Request failures drop the date and the run continues. Extraction
    /// failures follow the configured [`MissingCurrencyPolicy`].
    /// `update_callback` fires once per date processed.
    pub async fn run(
        &self,
        requested_days: i64,
        today: NaiveDate,
        update_callback: &(dyn Fn()),
    ) -> Result<ResultSet, ExtractionError> {
        let dates = date_keys(today, requested_days);
        info!(
            requested_days,
            effective_days = dates.len(),
            "Fetching exchange rates"
        );

        let mut results = ResultSet::with_capacity(dates.len());
        for date in dates {
            let url = self.url_for(&date);
            let outcome = self.fetcher.fetch(&url).await;
            update_callback();

            let body = match outcome {
                Ok(body) => body,
                Err(e) => {
                    warn!(date = %date, "{e}");
                    continue;
                }
            };

            match extract_record(&date, &body, &self.currencies) {
                Ok(rates) => {
                    debug!(date = %date, "Collected rates");
                    results.push(DailyRates { date, rates });
                }
                Err(e) if self.policy == MissingCurrencyPolicy::Skip => {
                    warn!(date = %date, "Skipping date: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(results)
    }
}
