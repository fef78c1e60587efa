use super::ui;
use crate::core::format::format_rate;
use crate::core::{IconResolver, PriceTable};
use comfy_table::Cell;

/// Renders every known quote, sorted by symbol.
pub fn render(table: &PriceTable, icons: &IconResolver) -> String {
    if table.is_empty() {
        return ui::style_text("No prices available.", ui::StyleType::Subtle);
    }

    let mut output = ui::new_styled_table();
    output.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Price"),
        ui::header_cell("Observed at (UTC)"),
        ui::header_cell("Icon"),
    ]);

    for quote in table.quotes() {
        output.add_row(vec![
            Cell::new(&quote.symbol),
            ui::number_cell(format_rate(quote.price)),
            Cell::new(quote.observed_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(icons.url_for(&quote.symbol)),
        ]);
    }

    format!(
        "{}\n\n{}\n\n{} symbols",
        ui::style_text("Prices", ui::StyleType::Title),
        output,
        table.len()
    )
}

pub fn run(table: &PriceTable, icons: &IconResolver) {
    println!("{}", render(table, icons));
}
