//! Exponential Moving Average.
//!
//! α = 2/(span+1), seeded with the first price, then
//! EMA[i] = α·P[i] + (1-α)·EMA[i-1]. No warmup: every position is defined.

use crate::domain::error::{check_window, TraderError};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_ema(values: &[f64], span: usize) -> Result<IndicatorSeries, TraderError> {
    check_window("span", span, values.len())?;

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Ema(span),
        values: ema_values(values, span).into_iter().map(Some).collect(),
    })
}

/// Raw recursion; callers validate `span` first.
pub(crate) fn ema_values(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &price in values {
        let ema = match prev {
            None => price,
            Some(p) => alpha * price + (1.0 - alpha) * p,
        };
        out.push(ema);
        prev = Some(ema);
    }
    out
}
