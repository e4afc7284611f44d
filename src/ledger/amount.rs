//! Amount parsing and decimal rounding shared by the entity and the reports.

use crate::errors::{LedgerError, Result};

/// Fractional digits kept on stored amounts and monetary totals.
pub const AMOUNT_PLACES: i32 = 2;
/// Fractional digits kept on percentages.
pub const PERCENT_PLACES: i32 = 1;
/// Amounts and balances must stay below this magnitude so cents remain exact.
pub const MAX_MAGNITUDE: f64 = 1e13;

/// Rounds `value` half away from zero to `places` fractional digits.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Avoid handing out `-0.0` from sums that cancel out.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Rounds a monetary value to cents.
pub fn round_money(value: f64) -> f64 {
    round_to(value, AMOUNT_PLACES)
}

/// Parses user-supplied text into a finite decimal below [`MAX_MAGNITUDE`].
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value.abs() < MAX_MAGNITUDE).then_some(value)
}

/// Parses a transaction amount: numeric, strictly positive, rounded to cents.
pub fn parse_amount(raw: &str) -> Result<f64> {
    match parse_decimal(raw) {
        Some(value) if value > 0.0 => {
            let rounded = round_money(value);
            if rounded > 0.0 && rounded < MAX_MAGNITUDE {
                Ok(rounded)
            } else {
                Err(LedgerError::validation(
                    "Amount must be a positive number",
                ))
            }
        }
        _ => Err(LedgerError::validation("Amount must be a positive number")),
    }
}

/// Parses a signed balance amount without rounding.
pub fn parse_balance(raw: &str) -> Result<f64> {
    parse_decimal(raw).ok_or_else(|| LedgerError::validation("Invalid balance amount"))
}
