//! Fill simulation against a `PortfolioState`.
//!
//! All-in entries sized in whole shares and full exits. No commission or
//! slippage is applied.

use chrono::NaiveDate;

use super::portfolio::PortfolioState;
use super::position::{Position, TradeKind, TradeRecord};

/// Result of an entry attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryResult {
    Entered(TradeRecord),
    InsufficientCapital,
    AlreadyLong,
}

/// Enter a long position with all available capital.
///
/// 1. Quantity = floor(capital / price), whole shares only
/// 2. If quantity == 0, return InsufficientCapital and leave the state as is
/// 3. Deduct the cost from capital and go long
pub fn enter_long(state: &mut PortfolioState, date: NaiveDate, price: f64) -> EntryResult {
    if state.is_long() {
        return EntryResult::AlreadyLong;
    }

    let mut shares = (state.capital / price).floor() as u64;
    // floor of a rounded quotient can overshoot by one share
    if shares > 0 && shares as f64 * price > state.capital {
        shares -= 1;
    }
    if shares == 0 {
        return EntryResult::InsufficientCapital;
    }

    state.capital -= shares as f64 * price;
    state.shares_held = shares;
    state.position = Position::Long;

    EntryResult::Entered(TradeRecord {
        date,
        kind: TradeKind::Buy,
        price,
        shares,
    })
}

/// Sell the whole holding. Returns `None` when already flat.
pub fn exit_long(state: &mut PortfolioState, date: NaiveDate, price: f64) -> Option<TradeRecord> {
    if !state.is_long() {
        return None;
    }

    let shares = state.shares_held;
    state.capital += shares as f64 * price;
    state.shares_held = 0;
    state.position = Position::Flat;

    Some(TradeRecord {
        date,
        kind: TradeKind::Sell,
        price,
        shares,
    })
}
