//! Seeded random-walk price generator.
//!
//! Daily returns are drawn from N(trend, volatility) and compounded from
//! `start_price`. Each bar opens at the previous close. The generator owns
//! its RNG, seeded from the config, so the same config always yields the
//! same series.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::domain::error::TraderError;
use crate::domain::price::{PricePoint, PriceSeries};
use crate::ports::price_port::PricePort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Stock,
    Crypto,
    Bond,
    Commodity,
}

impl AssetClass {
    /// Default (volatility, trend) per day.
    pub fn profile(self) -> (f64, f64) {
        match self {
            AssetClass::Stock => (0.02, 0.0002),
            AssetClass::Crypto => (0.05, 0.0005),
            AssetClass::Bond => (0.005, 0.00005),
            AssetClass::Commodity => (0.03, 0.0001),
        }
    }
}

impl FromStr for AssetClass {
    type Err = TraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(AssetClass::Stock),
            "crypto" => Ok(AssetClass::Crypto),
            "bond" => Ok(AssetClass::Bond),
            "commodity" => Ok(AssetClass::Commodity),
            other => Err(TraderError::invalid(
                "asset",
                format!("unknown asset class '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub asset: AssetClass,
    pub start_price: f64,
    pub days: usize,
    pub start_date: NaiveDate,
    pub seed: u64,
    pub volatility: Option<f64>,
    pub trend: Option<f64>,
}

pub struct SyntheticAdapter {
    config: SyntheticConfig,
}

impl SyntheticAdapter {
    pub fn new(config: SyntheticConfig) -> Self {
        Self { config }
    }

    fn validate(&self) -> Result<(f64, f64), TraderError> {
        let c = &self.config;
        if !c.start_price.is_finite() || c.start_price <= 0.0 {
            return Err(TraderError::invalid("start_price", "must be positive"));
        }
        if c.days == 0 {
            return Err(TraderError::invalid("days", "must be a positive integer"));
        }
        let (base_vol, base_trend) = c.asset.profile();
        let volatility = c.volatility.unwrap_or(base_vol);
        let trend = c.trend.unwrap_or(base_trend);
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(TraderError::invalid("volatility", "must be non-negative"));
        }
        if !trend.is_finite() {
            return Err(TraderError::invalid("trend", "must be finite"));
        }
        Ok((volatility, trend))
    }
}

impl PricePort for SyntheticAdapter {
    fn fetch_prices(&self) -> Result<PriceSeries, TraderError> {
        let (volatility, trend) = self.validate()?;
        let c = &self.config;
        let returns = Normal::new(trend, volatility)
            .map_err(|e| TraderError::invalid("volatility", e.to_string()))?;
        let mut rng = StdRng::seed_from_u64(c.seed);

        let mut points = Vec::with_capacity(c.days);
        let mut prev = c.start_price;
        for i in 0..c.days {
            let ret = returns.sample(&mut rng);
            // a return of -100% or worse would end the walk at zero
            let close = prev * (1.0 + ret).max(0.01);
            let date = c
                .start_date
                .checked_add_days(Days::new(i as u64))
                .ok_or_else(|| TraderError::invalid("days", "date range overflows"))?;

            points.push(PricePoint {
                date,
                open: prev,
                high: prev.max(close) * 1.01,
                low: prev.min(close) * 0.99,
                close,
            });
            prev = close;
        }

        PriceSeries::new(points)
    }

    fn describe(&self) -> String {
        format!(
            "synthetic {:?} walk (seed {}, {} days)",
            self.config.asset, self.config.seed, self.config.days
        )
    }
}
