//! Rolling standard deviation.
//!
//! Sample standard deviation (divides by n-1) over the trailing n values.
//! Warmup: first (n-1) positions are undefined. With n = 1 the sample
//! deviation has no degrees of freedom and every position is undefined.

use crate::domain::error::{check_window, TraderError};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_stddev(values: &[f64], window: usize) -> Result<IndicatorSeries, TraderError> {
    check_window("window", window, values.len())?;

    let out = (0..values.len())
        .map(|i| {
            if window < 2 || i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let mean = slice.iter().sum::<f64>() / window as f64;
            let variance = slice
                .iter()
                .map(|v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (window - 1) as f64;
            Some(variance.sqrt())
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Stddev(window),
        values: out,
    })
}
