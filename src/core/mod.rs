//! Core types and the rate aggregation logic

pub mod aggregator;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use aggregator::{Aggregator, MAX_DAYS, effective_days};
pub use error::{ExtractionError, RequestFailed};
pub use fetcher::JsonFetcher;
pub use rates::{CurrencyQuote, DailyRates, DateKey, RateRecord, ResultSet};
