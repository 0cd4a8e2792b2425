//! Exchange-rate table and the abstraction for loading it

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Pivot currency every rate in a table is expressed against by default.
pub const PIVOT_CURRENCY: &str = "USD";

/// Code published by the provider with a rate that cannot be converted against.
pub const EXCLUDED_CODE: &str = "ZWL";

/// Immutable mapping from currency code to its rate against the pivot currency.
#[derive(Debug, Clone)]
pub struct RateTable {
    base_code: String,
    rates: BTreeMap<String, f64>,
    updated_at: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Builds a table from raw provider rates.
    ///
    /// [`EXCLUDED_CODE`] is removed, as is any entry whose rate is not a
    /// finite positive number.
    pub fn new(base_code: &str, raw: HashMap<String, f64>) -> Self {
        let mut rates = BTreeMap::new();
        for (code, rate) in raw {
            let code = code.to_uppercase();
            if code == EXCLUDED_CODE {
                debug!(code = %code, "Dropping excluded currency");
                continue;
            }
            if !rate.is_finite() || rate <= 0.0 {
                warn!(code = %code, rate, "Dropping currency with unusable rate");
                continue;
            }
            rates.insert(code, rate);
        }

        RateTable {
            base_code: base_code.to_uppercase(),
            rates,
            updated_at: None,
        }
    }

    pub fn with_updated_at(mut self, updated_at: Option<DateTime<Utc>>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn base_code(&self) -> &str {
        &self.base_code
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Rate of `code` against the pivot. Lookup is case-insensitive.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_uppercase()).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rate(code).is_some()
    }

    /// All codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Codes starting with `prefix` (case-insensitive), in sorted order.
    pub fn codes_with_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_uppercase();
        self.rates
            .keys()
            .filter(|code| code.starts_with(&prefix))
            .cloned()
            .collect()
    }

    /// `(code, rate)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
pub trait RateTableProvider: Send + Sync {
    /// Fetches the full table of rates expressed against `base`.
    async fn fetch_table(&self, base: &str) -> Result<RateTable>;
}

#[cfg(test)]
pub(crate) fn sample_table() -> RateTable {
    let raw = HashMap::from([
        ("USD".to_string(), 1.0),
        ("EUR".to_string(), 0.9),
        ("GBP".to_string(), 0.79),
        ("JPY".to_string(), 151.37),
        ("INR".to_string(), 83.12),
        ("USN".to_string(), 1.0),
        ("ZWL".to_string(), 13.2),
    ]);
    RateTable::new(PIVOT_CURRENCY, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_code_is_removed() {
        let table = sample_table();
        assert!(!table.contains("ZWL"));
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_unusable_rates_are_dropped() {
        let raw = HashMap::from([
            ("USD".to_string(), 1.0),
            ("AAA".to_string(), 0.0),
            ("BBB".to_string(), -2.5),
            ("CCC".to_string(), f64::NAN),
            ("DDD".to_string(), f64::INFINITY),
        ]);
        let table = RateTable::new("usd", raw);
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["USD"]);
        assert_eq!(table.base_code(), "USD");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = sample_table();
        assert_eq!(table.rate("eur"), Some(0.9));
        assert_eq!(table.rate(" Gbp "), Some(0.79));
        assert_eq!(table.rate("XXX"), None);
    }

    #[test]
    fn test_codes_are_sorted() {
        let table = sample_table();
        let codes: Vec<&str> = table.codes().collect();
        assert_eq!(codes, vec!["EUR", "GBP", "INR", "JPY", "USD", "USN"]);
    }

    #[test]
    fn test_iter_pairs_in_code_order() {
        let table = sample_table();
        let pairs: Vec<(&str, f64)> = table.iter().take(2).collect();
        assert_eq!(pairs, vec![("EUR", 0.9), ("GBP", 0.79)]);
    }

    #[test]
    fn test_codes_with_prefix() {
        let table = sample_table();
        assert_eq!(table.codes_with_prefix("us"), vec!["USD", "USN"]);
        assert_eq!(table.codes_with_prefix(""), table.codes().collect::<Vec<_>>());
        assert!(table.codes_with_prefix("Q").is_empty());
    }
}
