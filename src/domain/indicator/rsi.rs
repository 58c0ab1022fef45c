//! RSI (Relative Strength Index).
//!
//! delta[i] = P[i] - P[i-1] (undefined at 0), gains and losses are the
//! clipped deltas, and their averages are simple means over `window`.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! - avg_loss == 0 and avg_gain > 0: RSI = 100
//! - avg_loss == 0 and avg_gain == 0: undefined (flat window)
//!
//! Warmup: first `window` positions are undefined.

use crate::domain::error::{check_window, TraderError};
use crate::domain::indicator::{rolling_mean, IndicatorSeries, IndicatorType};

pub fn calculate_rsi(values: &[f64], window: usize) -> Result<IndicatorSeries, TraderError> {
    check_window("window", window, values.len())?;

    let deltas: Vec<Option<f64>> = (0..values.len())
        .map(|i| (i > 0).then(|| values[i] - values[i - 1]))
        .collect();
    let gains: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| d.max(0.0))).collect();
    let losses: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|d| (-d).max(0.0))).collect();

    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);

    let out = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(gain, loss)| match (*gain, *loss) {
            (Some(gain), Some(loss)) => rsi_from_averages(gain, loss),
            _ => None,
        })
        .collect();

    Ok(IndicatorSeries {
        indicator_type: IndicatorType::Rsi(window),
        values: out,
    })
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return (avg_gain > 0.0).then_some(100.0);
    }
    Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}
