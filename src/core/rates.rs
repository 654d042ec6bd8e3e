//! Exchange rate data model

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::Display;

/// Date format used by the PrivatBank API and as the result key.
pub const DATE_KEY_FORMAT: &str = "%d.%m.%Y";

/// A calendar date rendered as `DD.MM.YYYY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateKey(String);

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date.format(DATE_KEY_FORMAT).to_string())
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CurrencyQuote {
    pub sale: f64,
    pub purchase: f64,
}

/// Quotes for one date, kept in the order the currencies were requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateRecord {
    quotes: Vec<(String, CurrencyQuote)>,
}

impl RateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, currency: &str, quote: CurrencyQuote) {
        match self.quotes.iter_mut().find(|(code, _)| code == currency) {
            Some((_, existing)) => *existing = quote,
            None => self.quotes.push((currency.to_string(), quote)),
        }
    }

    pub fn get(&self, currency: &str) -> Option<&CurrencyQuote> {
        self.quotes
            .iter()
            .find(|(code, _)| code == currency)
            .map(|(_, quote)| quote)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CurrencyQuote)> {
        self.quotes.iter().map(|(code, quote)| (code.as_str(), quote))
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl Serialize for RateRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.quotes.len()))?;
        for (code, quote) in &self.quotes {
            map.serialize_entry(code, quote)?;
        }
        map.end()
    }
}

/// One element of the result set: `{ "DD.MM.YYYY": { "EUR": {..}, "USD": {..} } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRates {
    pub date: DateKey,
    pub rates: RateRecord,
}

impl Serialize for DailyRates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.rates)?;
        map.end()
    }
}

/// Records for one run, most recent date first.
pub type ResultSet = Vec<DailyRates>;
