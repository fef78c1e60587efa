pub mod convert;
pub mod interactive;
pub mod prices;
pub mod setup;
pub mod ui;

use crate::core::{PriceSource, PriceTable};
use anyhow::Result;
use tracing::{error, info};

/// Loads the price table once, showing a spinner while the request is in
/// flight. A failed load leaves the converter unusable.
pub async fn load_prices(source: &dyn PriceSource) -> Result<PriceTable> {
    let pb = ui::new_spinner("Loading prices...");
    let result = source.load().await;
    pb.finish_and_clear();

    match result {
        Ok(table) => {
            info!(symbols = table.len(), "Prices loaded");
            Ok(table)
        }
        Err(e) => {
            error!(error = %e, "Error fetching prices");
            eprintln!(
                "{}",
                ui::style_text(
                    "Failed to fetch prices. Please try again later.",
                    ui::StyleType::Error
                )
            );
            Err(anyhow::Error::from(e).context("Error fetching prices"))
        }
    }
}
