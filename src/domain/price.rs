//! Price points and the validated price series the core consumes.

use chrono::NaiveDate;

use crate::domain::error::TraderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PricePoint {
    /// A single-price record: all four fields carry `price`.
    pub fn flat(date: NaiveDate, price: f64) -> Self {
        PricePoint {
            date,
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }
}

/// Ordered price records with strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, TraderError> {
        for (i, point) in points.iter().enumerate() {
            let fields = [point.open, point.high, point.low, point.close];
            if fields.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err(TraderError::invalid(
                    "prices",
                    format!("non-positive or non-finite price at {}", point.date),
                ));
            }
            if i > 0 && points[i - 1].date >= point.date {
                return Err(TraderError::invalid(
                    "prices",
                    format!(
                        "dates must be strictly increasing ({} then {})",
                        points[i - 1].date,
                        point.date
                    ),
                ));
            }
        }
        Ok(PriceSeries { points })
    }

    /// Build a close-only series from parallel dates and prices.
    pub fn from_closes(dates: &[NaiveDate], closes: &[f64]) -> Result<Self, TraderError> {
        if dates.len() != closes.len() {
            return Err(TraderError::invalid(
                "prices",
                format!("{} dates but {} prices", dates.len(), closes.len()),
            ));
        }
        let points = dates
            .iter()
            .zip(closes)
            .map(|(&date, &close)| PricePoint::flat(date, close))
            .collect();
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}
