//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{run_backtest as run_engine, BacktestConfig, BacktestResult};
use crate::domain::config_validation::{
    read_key, read_string, strategy_kind, validate_backtest_config, validate_strategy_config,
    validate_synthetic_config, StrategyKind, DEFAULT_INITIAL_CAPITAL, DEFAULT_LONG_WINDOW,
    DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD, DEFAULT_RSI_WINDOW, DEFAULT_SHORT_WINDOW,
};
use crate::domain::error::TraderError;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::domain::indicator::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
};
use crate::domain::metrics::Metrics;
use crate::domain::price::PriceSeries;
use crate::domain::strategy::Strategy;
use crate::domain::sweep::{best, sweep_crossover};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "signaltrader",
    about = "Technical indicator signals and single-asset backtesting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the configured strategy over the configured prices
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the trade log as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print indicator columns for the configured prices as CSV
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value_t = 20)]
        window: usize,
        /// Bollinger band width in standard deviations
        #[arg(long, default_value_t = 2.0)]
        k: f64,
    },
    /// Backtest every short/long SMA crossover pair
    Sweep {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, value_delimiter = ',', required = true)]
        short: Vec<usize>,
        #[arg(long, value_delimiter = ',', required = true)]
        long: Vec<usize>,
    },
    /// Validate a configuration file without running anything
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn execute(command: Command) -> Result<(), TraderError> {
    match command {
        Command::Backtest { config, output } => run_backtest(&config, output.as_deref()),
        Command::Indicators { config, window, k } => run_indicators(&config, window, k),
        Command::Sweep {
            config,
            short,
            long,
        } => run_sweep(&config, &short, &long),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TraderError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), TraderError> {
    validate_backtest_config(config)?;
    validate_strategy_config(config)?;
    if !config.has_key("backtest", "prices") {
        validate_synthetic_config(config)?;
    }
    Ok(())
}

pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, TraderError> {
    let initial_capital = read_key::<f64>(config, "backtest", "initial_capital")?
        .unwrap_or(DEFAULT_INITIAL_CAPITAL);
    let bt_config = BacktestConfig { initial_capital };
    bt_config.validate()?;
    Ok(bt_config)
}

pub fn build_strategy(config: &dyn ConfigPort) -> Result<Strategy, TraderError> {
    let window = |key: &str, default: usize| -> Result<usize, TraderError> {
        Ok(read_key::<usize>(config, "strategy", key)?.unwrap_or(default))
    };

    let strategy = match strategy_kind(config)? {
        StrategyKind::Crossover => Strategy::Crossover {
            short_window: window("short_window", DEFAULT_SHORT_WINDOW)?,
            long_window: window("long_window", DEFAULT_LONG_WINDOW)?,
        },
        StrategyKind::Rsi => Strategy::RsiThreshold {
            window: window("rsi_window", DEFAULT_RSI_WINDOW)?,
            oversold: read_key::<f64>(config, "strategy", "oversold")?.unwrap_or(DEFAULT_OVERSOLD),
            overbought: read_key::<f64>(config, "strategy", "overbought")?
                .unwrap_or(DEFAULT_OVERBOUGHT),
        },
        StrategyKind::Macd => Strategy::MacdCrossover {
            fast: window("fast", DEFAULT_FAST)?,
            slow: window("slow", DEFAULT_SLOW)?,
            signal: window("signal", DEFAULT_SIGNAL)?,
        },
    };
    strategy.validate()?;
    Ok(strategy)
}

#[cfg(feature = "synthetic")]
pub fn build_synthetic_config(
    config: &dyn ConfigPort,
) -> Result<crate::adapters::synthetic_adapter::SyntheticConfig, TraderError> {
    use crate::adapters::synthetic_adapter::{AssetClass, SyntheticConfig};
    use crate::domain::config_validation::parse_date;
    use chrono::NaiveDate;

    let asset = match read_string(config, "synthetic", "asset") {
        Some(raw) => raw.parse::<AssetClass>()?,
        None => AssetClass::Stock,
    };
    let start_date = match parse_date(config, "synthetic", "start_date")? {
        Some(date) => date,
        None => NaiveDate::from_ymd_opt(2023, 1, 1).ok_or_else(|| {
            TraderError::invalid("start_date", "default start date is out of range")
        })?,
    };

    Ok(SyntheticConfig {
        asset,
        start_price: read_key::<f64>(config, "synthetic", "start_price")?.unwrap_or(100.0),
        days: read_key::<usize>(config, "synthetic", "days")?.unwrap_or(365),
        start_date,
        seed: read_key::<u64>(config, "synthetic", "seed")?.unwrap_or(42),
        volatility: read_key::<f64>(config, "synthetic", "volatility")?,
        trend: read_key::<f64>(config, "synthetic", "trend")?,
    })
}

/// CSV prices when `[backtest] prices` is set, relative to the config file;
/// otherwise the seeded synthetic walk.
pub fn build_price_source(
    config: &dyn ConfigPort,
    config_path: &Path,
) -> Result<Box<dyn PricePort>, TraderError> {
    if let Some(raw) = read_string(config, "backtest", "prices") {
        let path = PathBuf::from(raw);
        let path = match config_path.parent() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        };
        return Ok(Box::new(CsvPriceAdapter::new(path)));
    }

    #[cfg(feature = "synthetic")]
    {
        use crate::adapters::synthetic_adapter::SyntheticAdapter;
        Ok(Box::new(SyntheticAdapter::new(build_synthetic_config(
            config,
        )?)))
    }

    #[cfg(not(feature = "synthetic"))]
    {
        Err(TraderError::ConfigMissing {
            section: "backtest".into(),
            key: "prices".into(),
        })
    }
}

fn load_prices(config: &dyn ConfigPort, config_path: &Path) -> Result<PriceSeries, TraderError> {
    let source = build_price_source(config, config_path)?;
    info!(source = %source.describe(), "loading prices");
    let prices = source.fetch_prices()?;
    if prices.is_empty() {
        return Err(TraderError::Data {
            reason: format!("no prices in {}", source.describe()),
        });
    }
    Ok(prices)
}

fn run_backtest(config_path: &Path, output: Option<&Path>) -> Result<(), TraderError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;
    let strategy = build_strategy(&config)?;
    let bt_config = build_backtest_config(&config)?;
    let prices = load_prices(&config, config_path)?;

    info!(strategy = %strategy, bars = prices.len(), "running backtest");
    let signals = strategy.generate(&prices)?;
    let result = run_engine(&prices, &signals, &bt_config)?;

    print_summary(&strategy, &result);

    if let Some(path) = output {
        let path_str = path.to_str().ok_or_else(|| TraderError::Data {
            reason: format!("output path is not valid UTF-8: {}", path.display()),
        })?;
        CsvReportAdapter.write(&result, &strategy, path_str)?;
        info!(path = %path.display(), "trade log written");
    }
    Ok(())
}

fn print_summary(strategy: &Strategy, result: &BacktestResult) {
    let metrics = Metrics::compute(result);

    println!("=== {} ===", strategy);
    println!("Initial Capital:  {:.2}", result.initial_capital);
    println!("Final Capital:    {:.2}", result.final_capital);
    println!("Total Return:     {:.2}%", result.total_return_pct);
    println!("Max Drawdown:     -{:.1}%", metrics.max_drawdown * 100.0);
    println!("Drawdown Bars:    {}", metrics.max_drawdown_duration);
    println!("Trades:           {}", result.trades.len());
    println!("Round Trips:      {}", metrics.round_trips);
    println!("Win Rate:         {:.1}%", metrics.win_rate * 100.0);

    if !result.trades.is_empty() {
        println!("\n=== Trades ===");
        for trade in &result.trades {
            println!(
                "  {}  {:<4}  {:>6} @ {:.2}",
                trade.date, trade.kind, trade.shares, trade.price
            );
        }
    }
    if let Some(fill) = &result.liquidation {
        println!(
            "  {}  {:<4}  {:>6} @ {:.2}  (liquidation)",
            fill.date, fill.kind, fill.shares, fill.price
        );
    }
}

fn run_indicators(config_path: &Path, window: usize, k: f64) -> Result<(), TraderError> {
    let config = load_config(config_path)?;
    validate_backtest_config(&config)?;
    if !config.has_key("backtest", "prices") {
        validate_synthetic_config(&config)?;
    }
    let prices = load_prices(&config, config_path)?;
    let closes = prices.closes();

    let sma = calculate_sma(&closes, window)?;
    let ema = calculate_ema(&closes, window)?;
    let bands = calculate_bollinger(&closes, window, k)?;
    let rsi = calculate_rsi(&closes, window)?;
    let fast = read_key::<usize>(&config, "strategy", "fast")?.unwrap_or(DEFAULT_FAST);
    let slow = read_key::<usize>(&config, "strategy", "slow")?.unwrap_or(DEFAULT_SLOW);
    let signal = read_key::<usize>(&config, "strategy", "signal")?.unwrap_or(DEFAULT_SIGNAL);
    let macd = calculate_macd(&closes, fast, slow, signal)?;

    let mut wtr = csv::Writer::from_writer(io::stdout().lock());
    let header = [
        "date".to_string(),
        "close".to_string(),
        sma.indicator_type.to_string(),
        ema.indicator_type.to_string(),
        "BB_UPPER".to_string(),
        "BB_LOWER".to_string(),
        rsi.indicator_type.to_string(),
        macd.indicator_type.to_string(),
        "MACD_SIGNAL".to_string(),
        "MACD_HIST".to_string(),
    ];
    wtr.write_record(&header).map_err(csv_error)?;

    for (i, point) in prices.points().iter().enumerate() {
        let row = [
            point.date.to_string(),
            format!("{:.4}", point.close),
            cell(sma.values[i]),
            cell(ema.values[i]),
            cell(bands.upper[i]),
            cell(bands.lower[i]),
            cell(rsi.values[i]),
            cell(macd.line[i]),
            cell(macd.signal[i]),
            cell(macd.histogram[i]),
        ];
        wtr.write_record(&row).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

fn csv_error(e: csv::Error) -> TraderError {
    TraderError::Data {
        reason: format!("failed to write CSV: {}", e),
    }
}

fn run_sweep(config_path: &Path, short: &[usize], long: &[usize]) -> Result<(), TraderError> {
    let config = load_config(config_path)?;
    validate_backtest_config(&config)?;
    if !config.has_key("backtest", "prices") {
        validate_synthetic_config(&config)?;
    }
    let bt_config = build_backtest_config(&config)?;
    let prices = load_prices(&config, config_path)?;

    let results = sweep_crossover(&prices, short, long, &bt_config)?;
    if results.is_empty() {
        warn!("no short/long pair satisfies short < long");
        return Err(TraderError::invalid(
            "long",
            "no short/long pair satisfies short < long",
        ));
    }
    info!(runs = results.len(), "sweep complete");

    println!("{:>6} {:>6} {:>14} {:>10} {:>7}", "short", "long", "final", "return%", "trades");
    for run in &results {
        if let Strategy::Crossover {
            short_window,
            long_window,
        } = run.strategy
        {
            println!(
                "{:>6} {:>6} {:>14.2} {:>10.2} {:>7}",
                short_window,
                long_window,
                run.result.final_capital,
                run.result.total_return_pct,
                run.result.trades.len()
            );
        }
    }
    if let Some(top) = best(&results) {
        println!(
            "\nBest: {} -> {:.2} ({:.2}%)",
            top.strategy, top.result.final_capital, top.result.total_return_pct
        );
    }
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), TraderError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;
    let strategy = build_strategy(&config)?;
    let bt_config = build_backtest_config(&config)?;

    println!("Strategy:         {}", strategy);
    println!("Initial Capital:  {:.2}", bt_config.initial_capital);
    match read_string(&config, "backtest", "prices") {
        Some(path) => println!("Prices:           {}", path),
        None => println!("Prices:           synthetic"),
    }
    println!("\nConfiguration is valid.");
    Ok(())
}
