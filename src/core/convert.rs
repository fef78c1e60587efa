//! Cross-rate conversion between two quoted assets.

use crate::core::price::PriceTable;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub output_amount: f64,
    pub display_rate: f64,
}

/// Converts `amount` of `from` into `to` using both assets' prices in the
/// common quote unit.
///
/// Returns `None` while the inputs are not ready: a non-finite amount or a
/// symbol missing from the table. This is an expected state, not a fault.
pub fn convert(table: &PriceTable, amount: f64, from: &str, to: &str) -> Option<ConversionResult> {
    if !amount.is_finite() {
        return None;
    }
    let from_price = table.price_of(from)?;
    let to_price = table.price_of(to)?;

    let display_rate = from_price / to_price;
    Some(ConversionResult {
        output_amount: amount * from_price / to_price,
        display_rate,
    })
}

impl ConversionRequest {
    pub fn evaluate(&self, table: &PriceTable) -> Option<ConversionResult> {
        convert(table, self.amount, &self.from, &self.to)
    }
}

/// Reads the leading decimal number of `input`, ignoring leading whitespace
/// and any trailing garbage (`"12abc"` is 12). Yields `None` when there is
/// no leading number or it is not finite.
pub fn parse_amount(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
