//! CSV trade-log report adapter.
//!
//! One row per executed trade. A forced end-of-run liquidation is written
//! last and flagged in the `liquidation` column.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::TraderError;
use crate::domain::position::{TradeKind, TradeRecord};
use crate::domain::strategy::Strategy;
use crate::ports::report_port::ReportPort;
use chrono::NaiveDate;
use serde::Serialize;

pub struct CsvReportAdapter;

#[derive(Serialize)]
struct TradeRow<'a> {
    strategy: &'a str,
    date: NaiveDate,
    kind: TradeKind,
    price: f64,
    shares: u64,
    liquidation: bool,
}

impl<'a> TradeRow<'a> {
    fn new(strategy: &'a str, trade: &TradeRecord, liquidation: bool) -> Self {
        TradeRow {
            strategy,
            date: trade.date,
            kind: trade.kind,
            price: trade.price,
            shares: trade.shares,
            liquidation,
        }
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        strategy: &Strategy,
        output_path: &str,
    ) -> Result<(), TraderError> {
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| TraderError::Data {
            reason: format!("failed to create {}: {}", output_path, e),
        })?;

        let name = strategy.to_string();
        let rows = result
            .trades
            .iter()
            .map(|t| (t, false))
            .chain(result.liquidation.iter().map(|t| (t, true)));

        for (trade, liquidation) in rows {
            wtr.serialize(TradeRow::new(&name, trade, liquidation))
                .map_err(|e| TraderError::Data {
                    reason: format!("failed to write trade: {}", e),
                })?;
        }
        wtr.flush()?;
        Ok(())
    }
}
