//! Cross-rate conversion through the pivot currency

use std::fmt::{self, Display};

use crate::core::rates::RateTable;
use crate::core::validation::ConversionRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub value: f64,
    pub from_code: String,
    pub to_code: String,
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

/// Price of one unit of `from_code` in `to_code`.
#[derive(Debug, Clone, PartialEq)]
pub struct RatePreview {
    pub from_code: String,
    pub to_code: String,
    pub rate: f64,
}

impl Display for RatePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {:.4} {}", self.from_code, self.rate, self.to_code)
    }
}

fn pivot(amount: f64, from_rate: f64, to_rate: f64) -> f64 {
    let pivot_amount = amount / from_rate;
    pivot_amount * to_rate
}

/// Converts `amount` of `from` into `to`, or `None` if either code is unknown.
pub fn convert(table: &RateTable, amount: f64, from: &str, to: &str) -> Option<f64> {
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;
    Some(pivot(amount, from_rate, to_rate))
}

/// Runs a validated request.
pub fn execute(request: &ConversionRequest) -> ConversionResult {
    let (from_rate, to_rate) = request.rates();
    ConversionResult {
        value: pivot(request.amount(), from_rate, to_rate),
        from_code: request.from_code().to_string(),
        to_code: request.to_code().to_string(),
    }
}

pub fn rate_preview(table: &RateTable, from: &str, to: &str) -> Option<RatePreview> {
    convert(table, 1.0, from, to).map(|rate| RatePreview {
        from_code: from.trim().to_uppercase(),
        to_code: to.trim().to_uppercase(),
        rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::sample_table;
    use crate::core::validation::validate;

    #[test]
    fn test_convert_matches_pivot_formula() {
        let table = sample_table();
        let codes: Vec<String> = table.codes().map(str::to_string).collect();
        for amount in [0.01, 1.0, 99.99, 2_500.0, 10_000.0] {
            for from in &codes {
                for to in &codes {
                    let expected =
                        amount / table.rate(from).unwrap() * table.rate(to).unwrap();
                    assert_eq!(convert(&table, amount, from, to), Some(expected));
                }
            }
        }
    }

    #[test]
    fn test_convert_same_currency_is_identity() {
        let table = sample_table();
        for code in table.codes() {
            for amount in [0.5, 123.45, 10_000.0] {
                let value = convert(&table, amount, code, code).unwrap();
                assert!((value - amount).abs() < 1e-9, "{code}: {value} != {amount}");
            }
        }
    }

    #[test]
    fn test_convert_unknown_code() {
        let table = sample_table();
        assert_eq!(convert(&table, 1.0, "XXX", "EUR"), None);
        assert_eq!(convert(&table, 1.0, "EUR", "ZWL"), None);
    }

    #[test]
    fn test_usd_to_eur_scenario() {
        let table = sample_table();
        let request = validate(&table, "100", "USD", "EUR").unwrap();
        let result = execute(&request);
        assert!((result.value - 90.0).abs() < 1e-9);
        assert_eq!(result.to_string(), "90.00");

        let preview = rate_preview(&table, "USD", "EUR").unwrap();
        assert_eq!(preview.to_string(), "1 USD = 0.9000 EUR");
    }

    #[test]
    fn test_preview_cross_rate() {
        let table = sample_table();
        let preview = rate_preview(&table, "eur", "gbp").unwrap();
        assert_eq!(preview.from_code, "EUR");
        assert_eq!(preview.to_string(), "1 EUR = 0.8778 GBP");
    }
}
