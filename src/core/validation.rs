//! Validation of user-entered amounts and currency codes

use thiserror::Error;

use crate::core::rates::RateTable;

/// Conversion ceiling: the largest amount accepted per conversion.
pub const MAX_AMOUNT: f64 = 10_000.0;

/// Longest text accepted in a currency selector.
pub const CODE_LEN: usize = 3;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Amount must be digits, no commas (,)")]
    InvalidFormat,
    #[error("Amount must be greater than 0")]
    NotPositive,
    #[error("Amount must be equal to or below {max}", max = MAX_AMOUNT)]
    AboveCeiling,
    #[error("Both currencies must be valid")]
    InvalidCurrency,
}

/// A conversion that has passed validation.
///
/// Only [`validate`] constructs one, so both codes are keys of the table it was
/// validated against and `amount` lies in `(0, MAX_AMOUNT]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    amount: f64,
    from_code: String,
    to_code: String,
    from_rate: f64,
    to_rate: f64,
}

impl ConversionRequest {
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from_code(&self) -> &str {
        &self.from_code
    }

    pub fn to_code(&self) -> &str {
        &self.to_code
    }

    /// Pivot rates of both codes, captured when the request was validated.
    pub fn rates(&self) -> (f64, f64) {
        (self.from_rate, self.to_rate)
    }
}

pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat)?;
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat);
    }
    if amount <= 0.0 {
        return Err(ValidationError::NotPositive);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AboveCeiling);
    }
    Ok(amount)
}

/// Normalizes `code` and looks up its pivot rate.
fn lookup(table: &RateTable, code: &str) -> Option<(String, f64)> {
    let code = code.trim().to_uppercase();
    table.rate(&code).map(|rate| (code, rate))
}

/// Normalizes both codes and checks that the table knows them.
pub fn validate_currencies(
    table: &RateTable,
    from: &str,
    to: &str,
) -> Result<(String, String), ValidationError> {
    match (lookup(table, from), lookup(table, to)) {
        (Some((from, _)), Some((to, _))) => Ok((from, to)),
        _ => Err(ValidationError::InvalidCurrency),
    }
}

/// Validates raw form input. Amount errors win over currency errors.
pub fn validate(
    table: &RateTable,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<ConversionRequest, ValidationError> {
    let amount = parse_amount(amount)?;
    let (Some((from_code, from_rate)), Some((to_code, to_rate))) =
        (lookup(table, from), lookup(table, to))
    else {
        return Err(ValidationError::InvalidCurrency);
    };
    Ok(ConversionRequest {
        amount,
        from_code,
        to_code,
        from_rate,
        to_rate,
    })
}

/// Filters a keystroke in a currency selector.
///
/// Returns the upper-cased text when it is alphabetic and at most
/// [`CODE_LEN`] characters long, `None` when the keystroke must be rejected.
pub fn sanitize_code_input(text: &str) -> Option<String> {
    let accepted =
        text.chars().count() <= CODE_LEN && text.chars().all(|c| c.is_ascii_alphabetic());
    accepted.then(|| text.to_ascii_uppercase())
}
