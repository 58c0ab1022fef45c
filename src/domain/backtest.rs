//! Backtest engine.
//!
//! Walks the price series and its aligned signals once, acting only on
//! transitions: the first Buy while flat and the first Sell while long.
//! A position still open after the last bar is liquidated at the final
//! close; that fill is folded into the final capital but kept out of the
//! trade log.

use tracing::{debug, info};

use super::error::TraderError;
use super::execution::{enter_long, exit_long, EntryResult};
use super::portfolio::{EquityPoint, PortfolioState};
use super::position::TradeRecord;
use super::price::PriceSeries;
use super::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
}

impl BacktestConfig {
    pub fn validate(&self) -> Result<(), TraderError> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(TraderError::invalid(
                "initial_capital",
                "initial_capital must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_return_pct: f64,
    pub trades: Vec<TradeRecord>,
    /// End-of-series liquidation, when the run finished long.
    pub liquidation: Option<TradeRecord>,
    pub equity_curve: Vec<EquityPoint>,
}

pub fn run_backtest(
    prices: &PriceSeries,
    signals: &[Signal],
    config: &BacktestConfig,
) -> Result<BacktestResult, TraderError> {
    config.validate()?;
    if prices.len() != signals.len() {
        return Err(TraderError::invalid(
            "signals",
            format!(
                "{} signals for {} price points",
                signals.len(),
                prices.len()
            ),
        ));
    }

    let mut state = PortfolioState::new(config.initial_capital);
    let mut trades = Vec::new();
    let mut equity_curve = Vec::with_capacity(prices.len());

    for (point, signal) in prices.points().iter().zip(signals) {
        match signal {
            Signal::Buy => match enter_long(&mut state, point.date, point.close) {
                EntryResult::Entered(trade) => {
                    debug!(date = %trade.date, price = trade.price, shares = trade.shares, "buy");
                    trades.push(trade);
                }
                EntryResult::InsufficientCapital => {
                    debug!(
                        date = %point.date,
                        price = point.close,
                        "buy skipped: insufficient capital"
                    );
                }
                EntryResult::AlreadyLong => {}
            },
            Signal::Sell => {
                if let Some(trade) = exit_long(&mut state, point.date, point.close) {
                    debug!(date = %trade.date, price = trade.price, shares = trade.shares, "sell");
                    trades.push(trade);
                }
            }
            Signal::Hold => {}
        }

        equity_curve.push(EquityPoint {
            date: point.date,
            equity: state.equity(point.close),
        });
    }

    let liquidation = match prices.last() {
        Some(last) => exit_long(&mut state, last.date, last.close),
        None => None,
    };
    if let Some(fill) = &liquidation {
        debug!(date = %fill.date, price = fill.price, shares = fill.shares, "forced liquidation");
    }

    let final_capital = state.capital;
    let total_return_pct =
        100.0 * (final_capital - config.initial_capital) / config.initial_capital;

    info!(
        bars = prices.len(),
        trades = trades.len(),
        final_capital,
        total_return_pct,
        "backtest complete"
    );

    Ok(BacktestResult {
        initial_capital: config.initial_capital,
        final_capital,
        total_return_pct,
        trades,
        liquidation,
        equity_curve,
    })
}
