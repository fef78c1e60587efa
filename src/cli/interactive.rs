//! Line-oriented converter session.
//!
//! Each input line maps to one form event (amount, from, to, swap) and the
//! recomputed view is printed after every change.

use super::ui;
use crate::core::{Converter, Event, View};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Commands:
  amount <value>   set the amount to convert (alias: a)
  from <SYMBOL>    set the asset to convert from (alias: f)
  to <SYMBOL>      set the asset to convert to (alias: t)
  swap             exchange the from and to assets (alias: s)
  list             show the available symbols (alias: l)
  help             show this help (alias: h, ?)
  quit             leave the session (alias: q, exit)";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Apply(Event),
    List,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// `None` for blank lines.
    fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        let command = match (verb.to_lowercase().as_str(), arg) {
            ("amount" | "a", arg) => Command::Apply(Event::AmountChanged(arg.to_string())),
            ("from" | "f", symbol) if !symbol.is_empty() => {
                Command::Apply(Event::FromChanged(symbol.to_string()))
            }
            ("to" | "t", symbol) if !symbol.is_empty() => {
                Command::Apply(Event::ToChanged(symbol.to_string()))
            }
            ("swap" | "s", "") => Command::Apply(Event::Swap),
            ("list" | "l", "") => Command::List,
            ("help" | "h" | "?", "") => Command::Help,
            ("quit" | "q" | "exit", "") => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// Renders the form state: amount and selection, result, rate and icons.
pub fn render_view(converter: &Converter, view: &View) -> String {
    let from = converter.from().unwrap_or("?");
    let to = converter.to().unwrap_or("?");
    let amount = match converter.amount_input().trim() {
        "" => "_",
        amount => amount,
    };

    let mut output = format!(
        "{amount} {from} -> {} {to}\n{}",
        ui::style_text(&view.output, ui::StyleType::Value),
        view.rate
    );
    if let (Some(from_icon), Some(to_icon)) = (&view.from_icon, &view.to_icon) {
        output.push('\n');
        output.push_str(&ui::style_text(
            &format!("{from_icon} | {to_icon}"),
            ui::StyleType::Subtle,
        ));
    }
    output
}

fn render_symbols(converter: &Converter) -> String {
    converter.table().symbols().collect::<Vec<_>>().join(" ")
}

/// Runs the session until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(
    converter: &mut Converter,
    input: R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "{}", render_view(converter, &converter.view()))?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        debug!(?command, "Session command");

        match command {
            Command::Apply(event) => {
                let unknown = match &event {
                    Event::FromChanged(symbol) | Event::ToChanged(symbol) => {
                        (!converter.table().contains(symbol)).then(|| symbol.clone())
                    }
                    _ => None,
                };
                if let Some(symbol) = unknown {
                    writeln!(
                        output,
                        "{}",
                        ui::style_text(&format!("Unknown symbol: {symbol}"), ui::StyleType::Error)
                    )?;
                    continue;
                }
                let view = converter.apply(event);
                writeln!(output, "{}", render_view(converter, &view))?;
            }
            Command::List => writeln!(output, "{}", render_symbols(converter))?,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
            Command::Unknown(line) => writeln!(
                output,
                "{}",
                ui::style_text(
                    &format!("Unknown command: {line} (type `help`)"),
                    ui::StyleType::Error
                )
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IconResolver, PriceQuote, PriceTable};
    use chrono::Utc;
    use std::io::Cursor;

    fn converter() -> Converter {
        let now = Utc::now();
        let table: PriceTable = [("ATOM", 6.0), ("ETH", 3000.0), ("USD", 1.0)]
            .into_iter()
            .map(|(symbol, price)| PriceQuote {
                symbol: symbol.to_string(),
                price,
                observed_at: now,
            })
            .collect();
        Converter::new(table, IconResolver::new("https://icons.example.com"))
    }

    fn run(script: &str) -> (Converter, String) {
        let mut converter = converter();
        let mut out = Vec::new();
        run_session(&mut converter, Cursor::new(script), &mut out).unwrap();
        (converter, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), None);
        assert_eq!(
            Command::parse("amount 2.5"),
            Some(Command::Apply(Event::AmountChanged("2.5".to_string())))
        );
        assert_eq!(
            Command::parse("F bNEO"),
            Some(Command::Apply(Event::FromChanged("bNEO".to_string())))
        );
        assert_eq!(Command::parse("swap"), Some(Command::Apply(Event::Swap)));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(
            Command::parse("to"),
            Some(Command::Unknown("to".to_string()))
        );
    }

    #[test]
    fn test_session_flow() {
        let (converter, out) = run("amount 2\nswap\nswap\nquit\namount 100\n");

        assert!(out.contains("2 ETH -> "));
        assert!(out.contains("6,000.00"));
        assert!(out.contains("1 ETH = 3,000 USD"));
        assert!(out.contains("1 USD = 0.000333 ETH"));
        assert_eq!(converter.from(), Some("ETH"));
        assert_eq!(converter.amount_input(), "2");
    }

    #[test]
    fn test_initial_view_is_not_ready() {
        let (_, out) = run("");
        assert!(out.starts_with("_ ETH -> "));
        assert!(out.contains("--"));
    }

    #[test]
    fn test_unknown_symbol_and_command() {
        let (converter, out) = run("to ZZZ\nfrobnicate\nlist\n");

        assert!(out.contains("Unknown symbol: ZZZ"));
        assert!(out.contains("Unknown command: frobnicate"));
        assert!(out.contains("ATOM ETH USD"));
        assert_eq!(converter.to(), Some("USD"));
    }
}
