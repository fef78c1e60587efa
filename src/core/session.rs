//! Converter state driven by user input events.
//!
//! A [`Converter`] owns the loaded [`PriceTable`] together with the current
//! form state. Every input event goes through [`Converter::apply`], which
//! updates the state and returns a freshly computed [`View`].

use crate::core::convert::{ConversionResult, convert, parse_amount};
use crate::core::format;
use crate::core::icon::IconResolver;
use crate::core::price::PriceTable;
use tracing::{debug, warn};

pub const DEFAULT_FROM: &str = "ETH";
pub const DEFAULT_TO: &str = "USD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    AmountChanged(String),
    FromChanged(String),
    ToChanged(String),
    Swap,
}

/// What the form shows after an event.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Formatted output amount, empty while not ready.
    pub output: String,
    /// `1 FROM = rate TO`, or the placeholder while not ready.
    pub rate: String,
    pub from_icon: Option<String>,
    pub to_icon: Option<String>,
    pub result: Option<ConversionResult>,
}

pub struct Converter {
    table: PriceTable,
    icons: IconResolver,
    amount_input: String,
    from: Option<String>,
    to: Option<String>,
}

impl Converter {
    /// Starts a session over a loaded table.
    ///
    /// `ETH` and `USD` are preselected when present; otherwise the first
    /// symbol in sorted order is selected, like a freshly filled dropdown.
    pub fn new(table: PriceTable, icons: IconResolver) -> Self {
        let from = Self::default_selection(&table, DEFAULT_FROM);
        let to = Self::default_selection(&table, DEFAULT_TO);
        debug!(?from, ?to, symbols = table.len(), "Converter ready");

        Self {
            table,
            icons,
            amount_input: String::new(),
            from,
            to,
        }
    }

    fn default_selection(table: &PriceTable, preferred: &str) -> Option<String> {
        if table.contains(preferred) {
            Some(preferred.to_string())
        } else {
            table.symbols().next().map(str::to_string)
        }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn to(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    /// Applies one input event and returns the recomputed view.
    pub fn apply(&mut self, event: Event) -> View {
        debug!(?event, "Applying event");
        match event {
            Event::AmountChanged(input) => self.amount_input = input,
            Event::FromChanged(symbol) => {
                if let Some(symbol) = self.checked_symbol(symbol) {
                    self.from = Some(symbol);
                }
            }
            Event::ToChanged(symbol) => {
                if let Some(symbol) = self.checked_symbol(symbol) {
                    self.to = Some(symbol);
                }
            }
            Event::Swap => std::mem::swap(&mut self.from, &mut self.to),
        }
        self.view()
    }

    fn checked_symbol(&self, symbol: String) -> Option<String> {
        if self.table.contains(&symbol) {
            Some(symbol)
        } else {
            warn!(%symbol, "Ignoring selection of unknown symbol");
            None
        }
    }

    /// Current result, `None` while the inputs are not ready.
    pub fn result(&self) -> Option<ConversionResult> {
        let amount = parse_amount(&self.amount_input)?;
        convert(&self.table, amount, self.from.as_deref()?, self.to.as_deref()?)
    }

    pub fn view(&self) -> View {
        let result = self.result();
        let (output, rate) = match (result, self.from.as_deref(), self.to.as_deref()) {
            (Some(r), Some(from), Some(to)) => (
                format::format_amount(r.output_amount),
                format::rate_line(from, to, Some(r.display_rate)),
            ),
            _ => (String::new(), format::RATE_PLACEHOLDER.to_string()),
        };

        View {
            output,
            rate,
            from_icon: self.from.as_deref().map(|s| self.icons.url_for(s)),
            to_icon: self.to.as_deref().map(|s| self.icons.url_for(s)),
            result,
        }
    }
}
