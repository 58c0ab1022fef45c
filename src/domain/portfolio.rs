//! Portfolio state and equity tracking for a single backtest run.

use chrono::NaiveDate;

use super::position::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Cash and holdings of one run. `position == Long` exactly when
/// `shares_held > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    pub capital: f64,
    pub shares_held: u64,
    pub position: Position,
}

impl PortfolioState {
    pub fn new(initial_capital: f64) -> Self {
        PortfolioState {
            capital: initial_capital,
            shares_held: 0,
            position: Position::Flat,
        }
    }

    pub fn is_long(&self) -> bool {
        self.position == Position::Long
    }

    /// Cash plus holdings marked at `price`.
    pub fn equity(&self, price: f64) -> f64 {
        self.capital + self.shares_held as f64 * price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_flat() {
        let state = PortfolioState::new(1000.0);
        assert!((state.capital - 1000.0).abs() < f64::EPSILON);
        assert_eq!(state.shares_held, 0);
        assert!(!state.is_long());
    }

    #[test]
    fn equity_marks_holdings() {
        let state = PortfolioState {
            capital: 82.0,
            shares_held: 9,
            position: Position::Long,
        };
        assert!((state.equity(110.0) - 1072.0).abs() < f64::EPSILON);
    }
}
