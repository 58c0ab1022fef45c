//! Core domain types and logic.

pub mod price;
pub mod indicator;
pub mod signal;
pub mod strategy;
pub mod position;
pub mod portfolio;
pub mod execution;
pub mod backtest;
pub mod metrics;
pub mod sweep;
pub mod config_validation;
pub mod error;
