//! Bollinger Bands.
//!
//! - Middle: SMA over n periods
//! - Upper: Middle + (k × StdDev)
//! - Lower: Middle - (k × StdDev)
//!
//! StdDev is the sample standard deviation of the same trailing window.
//! A position is undefined wherever the middle band or the deviation is.

use crate::domain::error::TraderError;
use crate::domain::indicator::{calculate_sma, calculate_stddev, IndicatorType};

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub indicator_type: IndicatorType,
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

pub fn calculate_bollinger(
    values: &[f64],
    window: usize,
    k: f64,
) -> Result<BollingerBands, TraderError> {
    if !k.is_finite() || k <= 0.0 {
        return Err(TraderError::invalid("k", "must be a positive number"));
    }
    let middle = calculate_sma(values, window)?.values;
    let stddev = calculate_stddev(values, window)?.values;

    let mut upper = Vec::with_capacity(values.len());
    let mut lower = Vec::with_capacity(values.len());
    for (m, sd) in middle.iter().zip(&stddev) {
        match (m, sd) {
            (Some(m), Some(sd)) => {
                upper.push(Some(m + k * sd));
                lower.push(Some(m - k * sd));
            }
            _ => {
                upper.push(None);
                lower.push(None);
            }
        }
    }

    Ok(BollingerBands {
        indicator_type: IndicatorType::Bollinger {
            period: window,
            stddev_mult_x100: (k * 100.0).round() as u32,
        },
        middle,
        upper,
        lower,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bollinger_warmup() {
        let bands = calculate_bollinger(&[10.0, 20.0, 30.0, 40.0, 50.0], 3, 2.0).unwrap();
        for i in 0..2 {
            assert!(bands.middle[i].is_none());
            assert!(bands.upper[i].is_none());
            assert!(bands.lower[i].is_none());
        }
        assert!(bands.upper[2].is_some());
    }

    #[test]
    fn bollinger_basic_calculation() {
        let bands = calculate_bollinger(&[10.0, 20.0, 30.0], 3, 2.0).unwrap();
        // sample variance of 10,20,30 is 100
        assert_relative_eq!(bands.middle[2].unwrap(), 20.0);
        assert_relative_eq!(bands.upper[2].unwrap(), 40.0);
        assert_relative_eq!(bands.lower[2].unwrap(), 0.0);
    }

    #[test]
    fn bollinger_constant_values_collapse() {
        let bands = calculate_bollinger(&[100.0; 5], 3, 2.0).unwrap();
        assert_eq!(bands.upper[4], bands.middle[4]);
        assert_eq!(bands.lower[4], bands.middle[4]);
    }

    #[test]
    fn bollinger_symmetry() {
        let bands = calculate_bollinger(&[10.0, 13.0, 11.0, 17.0], 3, 1.5).unwrap();
        let (u, m, l) = (
            bands.upper[3].unwrap(),
            bands.middle[3].unwrap(),
            bands.lower[3].unwrap(),
        );
        assert_relative_eq!(u - m, m - l, epsilon = 1e-10);
    }

    #[test]
    fn bollinger_rejects_non_positive_k() {
        assert!(calculate_bollinger(&[1.0, 2.0], 2, 0.0).is_err());
        assert!(calculate_bollinger(&[1.0, 2.0], 2, -1.0).is_err());
        assert!(calculate_bollinger(&[1.0, 2.0], 2, f64::INFINITY).is_err());
    }

    #[test]
    fn bollinger_rejects_bad_window() {
        assert!(calculate_bollinger(&[1.0, 2.0], 0, 2.0).is_err());
        assert!(matches!(
            calculate_bollinger(&[1.0, 2.0], 3, 2.0),
            Err(TraderError::InsufficientData { .. })
        ));
    }

    #[test]
    fn bollinger_indicator_type() {
        let bands = calculate_bollinger(&[1.0, 2.0, 3.0], 3, 2.0).unwrap();
        assert_eq!(
            bands.indicator_type,
            IndicatorType::Bollinger {
                period: 3,
                stddev_mult_x100: 200
            }
        );
    }
}
