//! Position state and trade records.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Flat,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeKind {
    Buy,
    Sell,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "BUY"),
            TradeKind::Sell => write!(f, "SELL"),
        }
    }
}

/// An executed fill. Appended to the trade log and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub kind: TradeKind,
    pub price: f64,
    pub shares: u64,
}

impl TradeRecord {
    pub fn value(&self) -> f64 {
        self.shares as f64 * self.price
    }
}
