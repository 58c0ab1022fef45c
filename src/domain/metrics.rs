//! Performance metrics derived from a finished backtest.

use super::backtest::BacktestResult;
use super::portfolio::EquityPoint;
use super::position::{TradeKind, TradeRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_return_pct: f64,
    /// Largest peak-to-trough decline as a fraction of the peak.
    pub max_drawdown: f64,
    /// Longest run of bars spent below a prior peak.
    pub max_drawdown_duration: usize,
    pub round_trips: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub win_rate: f64,
}

/// A buy matched with the sell (or forced liquidation) that closed it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    pub entry: TradeRecord,
    pub exit: TradeRecord,
}

impl RoundTrip {
    pub fn pnl(&self) -> f64 {
        self.exit.value() - self.entry.value()
    }
}

impl Metrics {
    pub fn compute(result: &BacktestResult) -> Self {
        let (max_drawdown, max_drawdown_duration) = compute_drawdown(&result.equity_curve);

        let trips = round_trips(result);
        let trades_won = trips.iter().filter(|t| t.pnl() > 0.0).count();
        let trades_lost = trips.iter().filter(|t| t.pnl() < 0.0).count();
        let win_rate = if trips.is_empty() {
            0.0
        } else {
            trades_won as f64 / trips.len() as f64
        };

        Metrics {
            total_return_pct: result.total_return_pct,
            max_drawdown,
            max_drawdown_duration,
            round_trips: trips.len(),
            trades_won,
            trades_lost,
            win_rate,
        }
    }
}

/// Pair each buy with the following sell, closing a trailing buy with the
/// forced liquidation.
pub fn round_trips(result: &BacktestResult) -> Vec<RoundTrip> {
    let mut trips = Vec::new();
    let mut open: Option<&TradeRecord> = None;

    for trade in result.trades.iter().chain(result.liquidation.iter()) {
        match (trade.kind, open) {
            (TradeKind::Buy, None) => open = Some(trade),
            (TradeKind::Sell, Some(entry)) => {
                trips.push(RoundTrip {
                    entry: entry.clone(),
                    exit: trade.clone(),
                });
                open = None;
            }
            _ => {}
        }
    }
    trips
}

fn compute_drawdown(equity_curve: &[EquityPoint]) -> (f64, usize) {
    let Some(first) = equity_curve.first() else {
        return (0.0, 0);
    };

    let mut peak = first.equity;
    let mut max_dd = 0.0_f64;
    let mut max_dd_duration = 0usize;
    let mut current_dd_duration = 0usize;

    for point in equity_curve {
        if point.equity >= peak {
            peak = point.equity;
            current_dd_duration = 0;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
            current_dd_duration += 1;
            if current_dd_duration > max_dd_duration {
                max_dd_duration = current_dd_duration;
            }
        }
    }

    (max_dd, max_dd_duration)
}
