//! Configuration validation.
//!
//! Every key is checked before any series is loaded or computed. Absent
//! keys fall back to their defaults; present keys must parse and satisfy
//! the same constraints the domain enforces.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::error::TraderError;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;
pub const DEFAULT_SHORT_WINDOW: usize = 10;
pub const DEFAULT_LONG_WINDOW: usize = 50;
pub const DEFAULT_RSI_WINDOW: usize = 14;
pub const DEFAULT_OVERSOLD: f64 = 30.0;
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;

pub const ASSET_CLASSES: [&str; 4] = ["stock", "crypto", "bond", "commodity"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Crossover,
    Rsi,
    Macd,
}

impl FromStr for StrategyKind {
    type Err = TraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crossover" => Ok(StrategyKind::Crossover),
            "rsi" => Ok(StrategyKind::Rsi),
            "macd" => Ok(StrategyKind::Macd),
            other => Err(invalid(
                "strategy",
                "kind",
                format!(
                    "unknown strategy kind '{}' (expected crossover, rsi or macd)",
                    other
                ),
            )),
        }
    }
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), TraderError> {
    let capital = read_key::<f64>(config, "backtest", "initial_capital")?
        .unwrap_or(DEFAULT_INITIAL_CAPITAL);
    if !capital.is_finite() || capital <= 0.0 {
        return Err(invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be positive",
        ));
    }
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), TraderError> {
    match strategy_kind(config)? {
        StrategyKind::Crossover => {
            let short = read_window(config, "short_window", DEFAULT_SHORT_WINDOW)?;
            let long = read_window(config, "long_window", DEFAULT_LONG_WINDOW)?;
            if short >= long {
                return Err(invalid(
                    "strategy",
                    "short_window",
                    format!("short_window {} must be less than long_window {}", short, long),
                ));
            }
        }
        StrategyKind::Rsi => {
            read_window(config, "rsi_window", DEFAULT_RSI_WINDOW)?;
            let oversold = read_key::<f64>(config, "strategy", "oversold")?
                .unwrap_or(DEFAULT_OVERSOLD);
            let overbought = read_key::<f64>(config, "strategy", "overbought")?
                .unwrap_or(DEFAULT_OVERBOUGHT);
            if !(0.0..=100.0).contains(&oversold) {
                return Err(invalid("strategy", "oversold", "must be within [0, 100]"));
            }
            if !(0.0..=100.0).contains(&overbought) {
                return Err(invalid("strategy", "overbought", "must be within [0, 100]"));
            }
            if oversold >= overbought {
                return Err(invalid(
                    "strategy",
                    "oversold",
                    "oversold must be less than overbought",
                ));
            }
        }
        StrategyKind::Macd => {
            let fast = read_window(config, "fast", DEFAULT_FAST)?;
            let slow = read_window(config, "slow", DEFAULT_SLOW)?;
            read_window(config, "signal", DEFAULT_SIGNAL)?;
            if fast >= slow {
                return Err(invalid(
                    "strategy",
                    "fast",
                    format!("fast period {} must be less than slow period {}", fast, slow),
                ));
            }
        }
    }
    Ok(())
}

pub fn validate_synthetic_config(config: &dyn ConfigPort) -> Result<(), TraderError> {
    if let Some(asset) = read_string(config, "synthetic", "asset") {
        if !ASSET_CLASSES.contains(&asset.to_ascii_lowercase().as_str()) {
            return Err(invalid(
                "synthetic",
                "asset",
                format!("unknown asset class '{}'", asset),
            ));
        }
    }
    if let Some(price) = read_key::<f64>(config, "synthetic", "start_price")? {
        if !price.is_finite() || price <= 0.0 {
            return Err(invalid("synthetic", "start_price", "start_price must be positive"));
        }
    }
    if read_key::<usize>(config, "synthetic", "days")? == Some(0) {
        return Err(invalid("synthetic", "days", "days must be at least 1"));
    }
    parse_date(config, "synthetic", "start_date")?;
    read_key::<u64>(config, "synthetic", "seed")?;
    if let Some(vol) = read_key::<f64>(config, "synthetic", "volatility")? {
        if !vol.is_finite() || vol < 0.0 {
            return Err(invalid("synthetic", "volatility", "volatility must be non-negative"));
        }
    }
    if let Some(trend) = read_key::<f64>(config, "synthetic", "trend")? {
        if !trend.is_finite() {
            return Err(invalid("synthetic", "trend", "trend must be finite"));
        }
    }
    Ok(())
}

/// `[strategy] kind`, defaulting to crossover.
pub fn strategy_kind(config: &dyn ConfigPort) -> Result<StrategyKind, TraderError> {
    match read_string(config, "strategy", "kind") {
        Some(raw) => raw.parse(),
        None => Ok(StrategyKind::Crossover),
    }
}

/// Trimmed, non-blank raw value.
pub fn read_string(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a present key, rejecting values that do not parse as `T`.
pub fn read_key<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, TraderError> {
    match read_string(config, section, key) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            invalid(section, key, format!("cannot parse '{}'", raw))
        }),
    }
}

pub fn parse_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDate>, TraderError> {
    match read_string(config, section, key) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                invalid(
                    section,
                    key,
                    format!("invalid {} format, expected YYYY-MM-DD", key),
                )
            }),
    }
}

fn read_window(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, TraderError> {
    let window = read_key::<usize>(config, "strategy", key)?.unwrap_or(default);
    if window == 0 {
        return Err(invalid("strategy", key, format!("{} must be at least 1", key)));
    }
    Ok(window)
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> TraderError {
    TraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}
