//! CSV file price adapter.
//!
//! Accepts a header row with `date` plus either `close` (or `price`) alone
//! or the full `open,high,low,close` set. Columns may appear in any order.

use crate::domain::error::TraderError;
use crate::domain::price::{PricePoint, PriceSeries};
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    path: PathBuf,
}

struct Columns {
    date: usize,
    close: usize,
    ohl: Option<(usize, usize, usize)>,
}

impl CsvPriceAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn columns(headers: &csv::StringRecord) -> Result<Columns, TraderError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let date = find("date").ok_or_else(|| TraderError::Data {
            reason: "missing date column".into(),
        })?;
        let close = find("close")
            .or_else(|| find("price"))
            .ok_or_else(|| TraderError::Data {
                reason: "missing close column".into(),
            })?;
        let ohl = match (find("open"), find("high"), find("low")) {
            (Some(o), Some(h), Some(l)) => Some((o, h, l)),
            _ => None,
        };
        Ok(Columns { date, close, ohl })
    }
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, TraderError> {
    record
        .get(index)
        .ok_or_else(|| TraderError::Data {
            reason: format!("missing {} value", name),
        })?
        .trim()
        .parse()
        .map_err(|e| TraderError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl PricePort for CsvPriceAdapter {
    fn fetch_prices(&self) -> Result<PriceSeries, TraderError> {
        let mut rdr = csv::Reader::from_path(&self.path).map_err(|e| TraderError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let headers = rdr.headers().map_err(|e| TraderError::Data {
            reason: format!("CSV header error: {}", e),
        })?;
        let cols = Self::columns(headers)?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| TraderError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(cols.date).ok_or_else(|| TraderError::Data {
                reason: "missing date value".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                TraderError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            let close = parse_field(&record, cols.close, "close")?;
            let point = match cols.ohl {
                Some((o, h, l)) => PricePoint {
                    date,
                    open: parse_field(&record, o, "open")?,
                    high: parse_field(&record, h, "high")?,
                    low: parse_field(&record, l, "low")?,
                    close,
                },
                None => PricePoint::flat(date, close),
            };
            points.push(point);
        }

        points.sort_by_key(|p| p.date);
        PriceSeries::new(points)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
