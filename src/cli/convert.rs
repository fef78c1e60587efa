use super::ui;
use crate::core::convert::parse_amount;
use crate::core::format::{RATE_PLACEHOLDER, format_amount, rate_line};
use crate::core::{ConversionRequest, PriceTable};
use tracing::debug;

/// One-shot conversion. Unknown symbols or an unparsable amount produce
/// the placeholders rather than an error.
pub fn render(table: &PriceTable, amount: &str, from: &str, to: &str) -> String {
    let result = parse_amount(amount).and_then(|amount| {
        ConversionRequest {
            amount,
            from: from.to_string(),
            to: to.to_string(),
        }
        .evaluate(table)
    });
    debug!(?result, %amount, %from, %to, "Computed conversion");

    match result {
        Some(r) => format!(
            "Output: {}\nRate:   {}",
            ui::style_text(&format!("{} {to}", format_amount(r.output_amount)), ui::StyleType::Value),
            rate_line(from, to, Some(r.display_rate))
        ),
        None => format!(
            "Output: \nRate:   {}",
            ui::style_text(RATE_PLACEHOLDER, ui::StyleType::Subtle)
        ),
    }
}

pub fn run(table: &PriceTable, amount: &str, from: &str, to: &str) {
    println!("{}", render(table, amount, from, to));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PriceQuote;
    use chrono::Utc;

    fn table() -> PriceTable {
        let now = Utc::now();
        [("ETH", 3000.0), ("USD", 1.0)]
            .into_iter()
            .map(|(symbol, price)| PriceQuote {
                symbol: symbol.to_string(),
                price,
                observed_at: now,
            })
            .collect()
    }

    #[test]
    fn test_render_conversion() {
        let rendered = render(&table(), "2", "ETH", "USD");
        assert!(rendered.contains("6,000.00 USD"));
        assert!(rendered.contains("1 ETH = 3,000 USD"));
    }

    #[test]
    fn test_render_unknown_symbol() {
        let rendered = render(&table(), "5", "ETH", "ZZZ");
        assert!(rendered.contains("--"));
        assert!(!rendered.contains("ZZZ"));
    }

    #[test]
    fn test_render_invalid_amount() {
        let rendered = render(&table(), "abc", "ETH", "USD");
        assert!(rendered.contains("--"));
        assert!(!rendered.contains("USD"));
    }
}
