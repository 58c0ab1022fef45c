#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use signaltrader::domain::backtest::BacktestConfig;
use signaltrader::domain::error::TraderError;
use signaltrader::domain::price::PriceSeries;
use signaltrader::ports::price_port::PricePort;
use std::io::Write;

/// In-memory price source.
pub struct MockPricePort {
    pub closes: Vec<f64>,
    pub error: Option<String>,
}

impl MockPricePort {
    pub fn new(closes: &[f64]) -> Self {
        Self {
            closes: closes.to_vec(),
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            closes: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl PricePort for MockPricePort {
    fn fetch_prices(&self) -> Result<PriceSeries, TraderError> {
        if let Some(reason) = &self.error {
            return Err(TraderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(series(&self.closes))
    }

    fn describe(&self) -> String {
        format!("mock ({} closes)", self.closes.len())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive daily dates starting 2024-01-01.
pub fn dates(n: usize) -> Vec<NaiveDate> {
    (0..n)
        .map(|i| date(2024, 1, 1) + Days::new(i as u64))
        .collect()
}

pub fn series(closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes(&dates(closes.len()), closes).unwrap()
}

pub fn sample_config(initial_capital: f64) -> BacktestConfig {
    BacktestConfig { initial_capital }
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Closes as a `date,close` CSV body.
pub fn prices_csv(closes: &[f64]) -> String {
    let mut out = String::from("date,close\n");
    for (d, c) in dates(closes.len()).iter().zip(closes) {
        out.push_str(&format!("{},{}\n", d, c));
    }
    out
}
