//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9.
//! The EMAs are seeded with the first value, so there is no warmup.

use crate::domain::error::{check_window, TraderError};
use crate::domain::indicator::ema::ema_values;
use crate::domain::indicator::IndicatorType;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub indicator_type: IndicatorType,
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn calculate_macd(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Result<MacdSeries, TraderError> {
    check_window("fast", fast, values.len())?;
    check_window("slow", slow, values.len())?;
    check_window("signal", signal_period, values.len())?;
    if fast >= slow {
        return Err(TraderError::invalid(
            "fast",
            format!("fast period {} must be less than slow period {}", fast, slow),
        ));
    }

    let ema_fast = ema_values(values, fast);
    let ema_slow = ema_values(values, slow);
    let line: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
    let signal = ema_values(&line, signal_period);
    let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

    Ok(MacdSeries {
        indicator_type: IndicatorType::Macd {
            fast,
            slow,
            signal: signal_period,
        },
        line: line.into_iter().map(Some).collect(),
        signal: signal.into_iter().map(Some).collect(),
        histogram: histogram.into_iter().map(Some).collect(),
    })
}

pub fn calculate_macd_default(values: &[f64]) -> Result<MacdSeries, TraderError> {
    calculate_macd(values, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
