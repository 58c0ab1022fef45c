//! Per-position trading signals and the rules that produce them.
//!
//! Both rules are stateless: each position is decided from the indicator
//! values at that position alone. Turning a signal into a position change
//! is the simulator's job.

use std::fmt;

use crate::domain::error::TraderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    /// +1 / -1 / 0
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// Buy while `short` is above `long`, sell while below, hold otherwise.
pub fn crossover_signals(
    short: &[Option<f64>],
    long: &[Option<f64>],
) -> Result<Vec<Signal>, TraderError> {
    if short.len() != long.len() {
        return Err(TraderError::invalid(
            "indicators",
            format!(
                "short series has {} values but long series has {}",
                short.len(),
                long.len()
            ),
        ));
    }

    Ok(short
        .iter()
        .zip(long)
        .map(|(s, l)| match (s, l) {
            (Some(s), Some(l)) if s > l => Signal::Buy,
            (Some(s), Some(l)) if s < l => Signal::Sell,
            _ => Signal::Hold,
        })
        .collect())
}

/// Buy at or below `oversold`, sell at or above `overbought`.
pub fn threshold_signals(
    oscillator: &[Option<f64>],
    oversold: f64,
    overbought: f64,
) -> Result<Vec<Signal>, TraderError> {
    validate_thresholds(oversold, overbought)?;

    Ok(oscillator
        .iter()
        .map(|value| match value {
            Some(v) if *v <= oversold => Signal::Buy,
            Some(v) if *v >= overbought => Signal::Sell,
            _ => Signal::Hold,
        })
        .collect())
}

pub fn validate_thresholds(oversold: f64, overbought: f64) -> Result<(), TraderError> {
    if !(0.0..=100.0).contains(&oversold) {
        return Err(TraderError::invalid("oversold", "must be between 0 and 100"));
    }
    if !(0.0..=100.0).contains(&overbought) {
        return Err(TraderError::invalid("overbought", "must be between 0 and 100"));
    }
    if oversold >= overbought {
        return Err(TraderError::invalid(
            "oversold",
            format!(
                "oversold {} must be below overbought {}",
                oversold, overbought
            ),
        ));
    }
    Ok(())
}

pub fn validate_windows(short_window: usize, long_window: usize) -> Result<(), TraderError> {
    if short_window == 0 {
        return Err(TraderError::invalid("short_window", "must be a positive integer"));
    }
    if short_window >= long_window {
        return Err(TraderError::invalid(
            "short_window",
            format!(
                "short_window {} must be less than long_window {}",
                short_window, long_window
            ),
        ));
    }
    Ok(())
}
