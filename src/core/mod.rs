//! Core conversion logic, independent of the terminal front-end

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod icon;
pub mod log;
pub mod price;
pub mod session;

// Re-export main types for cleaner imports
pub use convert::{ConversionRequest, ConversionResult, convert};
pub use error::LoadError;
pub use icon::IconResolver;
pub use price::{PriceQuote, PriceSource, PriceTable};
pub use session::{Converter, Event, View};
