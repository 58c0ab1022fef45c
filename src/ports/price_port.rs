//! Price data access port trait.

use crate::domain::error::TraderError;
use crate::domain::price::PriceSeries;

/// A source of one validated price series.
pub trait PricePort {
    fn fetch_prices(&self) -> Result<PriceSeries, TraderError>;

    /// Short label for logs and reports.
    fn describe(&self) -> String;
}
