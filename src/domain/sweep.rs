//! Parameter sweeps over independent backtests.
//!
//! Each grid cell runs its own strategy and backtest against the shared,
//! read-only price series; runs are spread across the rayon pool and
//! collected back in grid order.

use rayon::prelude::*;

use super::backtest::{run_backtest, BacktestConfig, BacktestResult};
use super::error::TraderError;
use super::price::PriceSeries;
use super::strategy::Strategy;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub strategy: Strategy,
    pub result: BacktestResult,
}

/// Run every `(short, long)` pair with `short < long`, in the order the
/// windows are given.
pub fn sweep_crossover(
    prices: &PriceSeries,
    short_windows: &[usize],
    long_windows: &[usize],
    config: &BacktestConfig,
) -> Result<Vec<SweepResult>, TraderError> {
    config.validate()?;

    let grid: Vec<Strategy> = short_windows
        .iter()
        .flat_map(|&short_window| {
            long_windows
                .iter()
                .filter(move |&&long_window| short_window < long_window)
                .map(move |&long_window| Strategy::Crossover {
                    short_window,
                    long_window,
                })
        })
        .collect();

    grid.into_par_iter()
        .map(|strategy| -> Result<SweepResult, TraderError> {
            let signals = strategy.generate(prices)?;
            let result = run_backtest(prices, &signals, config)?;
            Ok(SweepResult { strategy, result })
        })
        .collect()
}

/// Best run by final capital; ties keep the earlier grid cell.
pub fn best(results: &[SweepResult]) -> Option<&SweepResult> {
    results.iter().reduce(|best, candidate| {
        if candidate.result.final_capital > best.result.final_capital {
            candidate
        } else {
            best
        }
    })
}
