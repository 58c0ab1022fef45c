//! Strategy configuration and signal generation.
//!
//! A `Strategy` names which indicators to compute over the close prices and
//! which rule turns them into signals. Parameters are validated before any
//! indicator is computed.

use std::fmt;

use crate::domain::error::TraderError;
use crate::domain::indicator::{calculate_macd, calculate_rsi, calculate_sma};
use crate::domain::price::PriceSeries;
use crate::domain::signal::{
    crossover_signals, threshold_signals, validate_thresholds, validate_windows, Signal,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Short SMA against long SMA.
    Crossover {
        short_window: usize,
        long_window: usize,
    },
    /// RSI against oversold/overbought thresholds.
    RsiThreshold {
        window: usize,
        oversold: f64,
        overbought: f64,
    },
    /// MACD line against its signal line.
    MacdCrossover {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

impl Strategy {
    pub fn validate(&self) -> Result<(), TraderError> {
        match *self {
            Strategy::Crossover {
                short_window,
                long_window,
            } => validate_windows(short_window, long_window),
            Strategy::RsiThreshold {
                window,
                oversold,
                overbought,
            } => {
                if window == 0 {
                    return Err(TraderError::invalid("rsi_window", "must be a positive integer"));
                }
                validate_thresholds(oversold, overbought)
            }
            Strategy::MacdCrossover { fast, slow, signal } => {
                if fast == 0 || signal == 0 {
                    return Err(TraderError::invalid(
                        "fast",
                        "MACD periods must be positive integers",
                    ));
                }
                if fast >= slow {
                    return Err(TraderError::invalid(
                        "fast",
                        format!("fast period {} must be less than slow period {}", fast, slow),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Compute one signal per price point.
    pub fn generate(&self, prices: &PriceSeries) -> Result<Vec<Signal>, TraderError> {
        self.validate()?;
        let closes = prices.closes();

        match *self {
            Strategy::Crossover {
                short_window,
                long_window,
            } => {
                let short = calculate_sma(&closes, short_window)?;
                let long = calculate_sma(&closes, long_window)?;
                crossover_signals(&short.values, &long.values)
            }
            Strategy::RsiThreshold {
                window,
                oversold,
                overbought,
            } => {
                let rsi = calculate_rsi(&closes, window)?;
                threshold_signals(&rsi.values, oversold, overbought)
            }
            Strategy::MacdCrossover { fast, slow, signal } => {
                let macd = calculate_macd(&closes, fast, slow, signal)?;
                crossover_signals(&macd.line, &macd.signal)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Crossover {
                short_window,
                long_window,
            } => write!(f, "SMA crossover ({}/{})", short_window, long_window),
            Strategy::RsiThreshold {
                window,
                oversold,
                overbought,
            } => write!(f, "RSI({}) threshold ({}/{})", window, oversold, overbought),
            Strategy::MacdCrossover { fast, slow, signal } => {
                write!(f, "MACD crossover ({},{},{})", fast, slow, signal)
            }
        }
    }
}
