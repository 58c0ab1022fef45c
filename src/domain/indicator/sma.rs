//! Simple Moving Average.
//!
//! SMA(n)[i] = mean(P[i-n+1..=i]); the first (n-1) positions are undefined.

use crate::domain::error::{check_window, TraderError};
use crate::domain::indicator::{rolling_mean, IndicatorSeries, IndicatorType};

pub fn calculate_sma(values: &[f64], window: usize) -> Result<IndicatorSeries, TraderError> {
    check_window("window", window, values.len())?;
    let defined: Vec<Option<f64>> = values.iter().copied().map(Some).collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Sma(window),
        values: rolling_mean(&defined, window),
    })
}
