//! Technical indicator implementations.
//!
//! Every indicator is a pure function over a numeric slice and returns
//! sequences of the same length, positionally aligned with the input:
//! - `IndicatorType`: indicator identity + parameters (column label, map key)
//! - `IndicatorSeries`: one aligned sequence where `None` marks positions
//!   that are not yet computable
//! - `BollingerBands` / `MacdSeries`: multi-line results

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stddev;

pub use bollinger::{calculate_bollinger, BollingerBands};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, calculate_macd_default, MacdSeries};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stddev::calculate_stddev;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Stddev(usize),
    Rsi(usize),
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the first defined value, if any.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
        }
    }
}

/// Trailing mean over `window` entries; undefined while the window is not
/// full or holds an undefined entry.
pub(crate) fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            values[i + 1 - window..=i]
                .iter()
                .copied()
                .sum::<Option<f64>>()
                .map(|sum| sum / window as f64)
        })
        .collect()
}
