//! Price quotes and the per-load price table

use crate::core::error::LoadError;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, warn};

/// One element of the price list as served by the price source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawQuote {
    pub currency: String,
    pub price: f64,
    pub date: String,
}

/// A single price observation for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    pub observed_at: DateTime<Utc>,
}

impl TryFrom<RawQuote> for PriceQuote {
    type Error = anyhow::Error;

    fn try_from(raw: RawQuote) -> Result<Self> {
        if raw.currency.trim().is_empty() {
            return Err(anyhow!("Quote has an empty currency"));
        }
        if !raw.price.is_finite() || raw.price <= 0.0 {
            return Err(anyhow!(
                "Invalid price {} for currency: {}",
                raw.price,
                raw.currency
            ));
        }
        let observed_at = parse_quote_date(&raw.date)
            .with_context(|| format!("Invalid date for currency: {}", raw.currency))?;

        Ok(PriceQuote {
            symbol: raw.currency,
            price: raw.price,
            observed_at,
        })
    }
}

/// Parses the timestamp of a quote.
///
/// Accepts RFC 3339 (`2023-08-29T07:10:40.000Z`), a naive date-time which is
/// taken as UTC, or a plain `YYYY-MM-DD` date at UTC midnight.
pub fn parse_quote_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    // Zone-less stamps are read as UTC, not local time, so runs on machines
    // in different zones order them the same way.
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| anyhow!("Date out of range: {raw}"));
    }
    Err(anyhow!("Failed to parse date: {raw}"))
}

/// Latest known quote per symbol, built once per load.
///
/// There is no way to mutate a table after it is built; a reload replaces
/// it wholesale.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    quotes: BTreeMap<String, PriceQuote>,
}

impl PriceTable {
    /// Builds a table keeping, for every symbol, the quote with the latest
    /// `observed_at`. On equal timestamps the first quote seen is kept.
    pub fn from_quotes<I>(quotes: I) -> Self
    where
        I: IntoIterator<Item = PriceQuote>,
    {
        let mut table = PriceTable::default();
        for quote in quotes {
            table.offer(quote);
        }
        table
    }

    /// Builds a table from the decoded JSON list. Entries that do not form a
    /// valid quote are logged and skipped.
    pub fn from_raw_values(values: Vec<serde_json::Value>) -> Self {
        let total = values.len();
        let quotes: Vec<PriceQuote> = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let quote = serde_json::from_value::<RawQuote>(value)
                    .map_err(anyhow::Error::from)
                    .and_then(PriceQuote::try_from);
                match quote {
                    Ok(quote) => Some(quote),
                    Err(e) => {
                        warn!(index, error = %e, "Skipping malformed quote");
                        None
                    }
                }
            })
            .collect();

        let table = Self::from_quotes(quotes);
        debug!(total, symbols = table.len(), "Built price table");
        table
    }

    fn offer(&mut self, quote: PriceQuote) {
        match self.quotes.entry(quote.symbol.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(quote);
            }
            Entry::Occupied(mut slot) => {
                if quote.observed_at > slot.get().observed_at {
                    slot.insert(quote);
                }
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceQuote> {
        self.quotes.get(symbol)
    }

    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.quotes.get(symbol).map(|q| q.price)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.quotes.contains_key(symbol)
    }

    /// Symbols in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.keys().map(String::as_str)
    }

    pub fn quotes(&self) -> impl Iterator<Item = &PriceQuote> {
        self.quotes.values()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<PriceQuote> for PriceTable {
    fn from_iter<I: IntoIterator<Item = PriceQuote>>(iter: I) -> Self {
        Self::from_quotes(iter)
    }
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches the full price list and normalizes it into a table.
    async fn load(&self) -> Result<PriceTable, LoadError>;
}
