//! Display policy for converted amounts and rates.
//!
//! Values with a magnitude below [`EXPONENTIAL_THRESHOLD`] are shown in
//! exponential notation with four fractional digits. Everything else uses
//! en-US digit grouping with a bounded number of fractional digits.

/// Values strictly below this magnitude render in exponential notation.
pub const EXPONENTIAL_THRESHOLD: f64 = 1e-6;

/// Shown in place of the rate while the converter is not ready.
pub const RATE_PLACEHOLDER: &str = "--";

const MAX_FRACTION_DIGITS: usize = 6;

/// Formats a converted amount: 2 to 6 fractional digits.
pub fn format_amount(value: f64) -> String {
    format_value(value, 2, MAX_FRACTION_DIGITS)
}

/// Formats an exchange rate: up to 6 fractional digits, none required.
pub fn format_rate(value: f64) -> String {
    format_value(value, 0, MAX_FRACTION_DIGITS)
}

/// `1 ETH = 3,000 USD`, or the placeholder when no rate is available.
pub fn rate_line(from: &str, to: &str, rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("1 {from} = {} {to}", format_rate(rate)),
        None => RATE_PLACEHOLDER.to_string(),
    }
}

fn format_value(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if value.abs() < EXPONENTIAL_THRESHOLD {
        format_exponential(value, 4)
    } else {
        format_grouped(value, min_fraction, max_fraction)
    }
}

/// Exponential notation with an explicit exponent sign, e.g. `9.9999e-7`
/// or `0.0000e+0`.
pub fn format_exponential(value: f64, fraction_digits: usize) -> String {
    // -0.0 prints without a sign
    let value = if value == 0.0 { 0.0 } else { value };
    let formatted = format!("{value:.fraction_digits$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Decimal notation with `,` thousands separators, rounded to at most
/// `max_fraction` digits and padded to at least `min_fraction`.
///
/// Rounding starts from the shortest decimal form that round-trips to
/// `value` and resolves ties away from zero, so `0.0078125` rounds to
/// `0.007813` and `1e23` prints as `100,000,...`.
pub fn format_grouped(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let (int_part, frac_part) = round_shortest(value.abs(), max_fraction);

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < min_fraction {
        fraction.push('0');
    }

    let mut output = String::new();
    let is_zero = int_part.bytes().all(|b| b == b'0') && fraction.bytes().all(|b| b == b'0');
    if value.is_sign_negative() && !is_zero {
        output.push('-');
    }
    output.push_str(&group_thousands(&int_part));
    if !fraction.is_empty() {
        output.push('.');
        output.push_str(&fraction);
    }
    output
}

/// Splits the shortest decimal form of a non-negative `value` into integer
/// and fraction digits, rounding half away from zero at `max_fraction`.
fn round_shortest(value: f64, max_fraction: usize) -> (String, String) {
    // f64 Display is the shortest round-trip form and never uses an exponent
    let shortest = value.to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((&shortest, ""));
    if frac_part.len() <= max_fraction {
        return (int_part.to_string(), frac_part.to_string());
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(max_fraction))
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes()[max_fraction] >= b'5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            int_len += 1;
        }
    }

    let fraction = digits.split_off(int_len);
    (
        String::from_utf8_lossy(&digits).into_owned(),
        String::from_utf8_lossy(&fraction).into_owned(),
    )
}

fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().rev().collect();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result.chars().rev().collect()
}
