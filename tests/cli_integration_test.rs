//! CLI integration tests for command orchestration.
//!
//! Tests cover:
//! - Argument parsing for every subcommand
//! - Config building (build_backtest_config, build_strategy, build_synthetic_config)
//! - Price source resolution (CSV relative to the config file, synthetic fallback)
//! - Running commands against real INI and CSV files on disk

mod common;

use clap::Parser;
use common::*;
use signaltrader::adapters::file_config_adapter::FileConfigAdapter;
use signaltrader::cli::{self, Cli, Command};
use signaltrader::domain::error::TraderError;
use signaltrader::domain::strategy::Strategy;
use std::fs;
use std::path::{Path, PathBuf};

const CROSSOVER_INI: &str = r#"
[backtest]
initial_capital = 1000
prices = prices.csv

[strategy]
kind = crossover
short_window = 1
long_window = 2
"#;

fn config(content: &str) -> FileConfigAdapter {
    FileConfigAdapter::from_string(content).unwrap()
}

/// Config and price files side by side in a temp directory.
fn workspace(ini: &str, closes: &[f64]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let ini_path = dir.path().join("config.ini");
    fs::write(&ini_path, ini).unwrap();
    fs::write(dir.path().join("prices.csv"), prices_csv(closes)).unwrap();
    (dir, ini_path)
}

mod argument_parsing {
    use super::*;

    #[test]
    fn backtest_with_output() {
        let cli = Cli::try_parse_from([
            "signaltrader",
            "backtest",
            "-c",
            "run.ini",
            "-o",
            "trades.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Backtest { config, output } => {
                assert_eq!(config, PathBuf::from("run.ini"));
                assert_eq!(output, Some(PathBuf::from("trades.csv")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn indicators_defaults() {
        let cli =
            Cli::try_parse_from(["signaltrader", "indicators", "--config", "run.ini"]).unwrap();
        match cli.command {
            Command::Indicators { window, k, .. } => {
                assert_eq!(window, 20);
                assert_eq!(k, 2.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn sweep_splits_window_lists() {
        let cli = Cli::try_parse_from([
            "signaltrader",
            "sweep",
            "-c",
            "run.ini",
            "--short",
            "3,5",
            "--long",
            "10,20,50",
        ])
        .unwrap();
        match cli.command {
            Command::Sweep { short, long, .. } => {
                assert_eq!(short, vec![3, 5]);
                assert_eq!(long, vec![10, 20, 50]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn sweep_requires_windows() {
        assert!(Cli::try_parse_from(["signaltrader", "sweep", "-c", "run.ini"]).is_err());
    }

    #[test]
    fn config_is_required() {
        assert!(Cli::try_parse_from(["signaltrader", "validate"]).is_err());
    }
}

mod config_building {
    use super::*;

    #[test]
    fn crossover_strategy_from_config() {
        let strategy = cli::build_strategy(&config(CROSSOVER_INI)).unwrap();
        assert_eq!(
            strategy,
            Strategy::Crossover {
                short_window: 1,
                long_window: 2
            }
        );
    }

    #[test]
    fn defaults_when_strategy_section_absent() {
        let strategy = cli::build_strategy(&config("")).unwrap();
        assert_eq!(
            strategy,
            Strategy::Crossover {
                short_window: 10,
                long_window: 50
            }
        );
        let bt = cli::build_backtest_config(&config("")).unwrap();
        assert_eq!(bt.initial_capital, 10_000.0);
    }

    #[test]
    fn rsi_strategy_from_config() {
        let strategy =
            cli::build_strategy(&config("[strategy]\nkind = rsi\nrsi_window = 7\noversold = 25\n"))
                .unwrap();
        assert_eq!(
            strategy,
            Strategy::RsiThreshold {
                window: 7,
                oversold: 25.0,
                overbought: 70.0
            }
        );
    }

    #[test]
    fn macd_strategy_defaults() {
        let strategy = cli::build_strategy(&config("[strategy]\nkind = macd\n")).unwrap();
        assert_eq!(
            strategy,
            Strategy::MacdCrossover {
                fast: 12,
                slow: 26,
                signal: 9
            }
        );
    }

    #[test]
    fn malformed_window_is_config_error() {
        let err = cli::build_strategy(&config("[strategy]\nshort_window = ten\n")).unwrap_err();
        assert!(matches!(err, TraderError::ConfigInvalid { key, .. } if key == "short_window"));
    }

    #[test]
    fn inverted_windows_fail_validation() {
        let err =
            cli::validate_config(&config("[strategy]\nshort_window = 50\nlong_window = 20\n"))
                .unwrap_err();
        assert!(matches!(err, TraderError::ConfigInvalid { .. }));
    }

    #[test]
    fn synthetic_section_ignored_when_prices_given() {
        let cfg = config("[backtest]\nprices = p.csv\n\n[synthetic]\nasset = forex\n");
        assert!(cli::validate_config(&cfg).is_ok());
        let cfg = config("[synthetic]\nasset = forex\n");
        assert!(cli::validate_config(&cfg).is_err());
    }

    #[test]
    fn synthetic_config_from_section() {
        use signaltrader::adapters::synthetic_adapter::AssetClass;

        let cfg = config(
            "[synthetic]\nasset = crypto\nstart_price = 250\ndays = 30\nstart_date = 2022-06-01\nseed = 7\ntrend = 0.001\n",
        );
        let synthetic = cli::build_synthetic_config(&cfg).unwrap();
        assert_eq!(synthetic.asset, AssetClass::Crypto);
        assert_eq!(synthetic.start_price, 250.0);
        assert_eq!(synthetic.days, 30);
        assert_eq!(synthetic.start_date, date(2022, 6, 1));
        assert_eq!(synthetic.seed, 7);
        assert_eq!(synthetic.volatility, None);
        assert_eq!(synthetic.trend, Some(0.001));
    }
}

mod price_sources {
    use super::*;

    #[test]
    fn csv_path_resolved_against_config_dir() {
        let (_dir, ini_path) = workspace(CROSSOVER_INI, &[100.0, 102.0, 101.0]);
        let cfg = FileConfigAdapter::from_file(&ini_path).unwrap();
        let prices = cli::build_price_source(&cfg, &ini_path)
            .unwrap()
            .fetch_prices()
            .unwrap();
        assert_eq!(prices.closes(), vec![100.0, 102.0, 101.0]);
    }

    #[test]
    fn synthetic_fallback_is_seeded() {
        let cfg = config("[synthetic]\ndays = 40\nseed = 3\n");
        let path = Path::new("config.ini");
        let a = cli::build_price_source(&cfg, path)
            .unwrap()
            .fetch_prices()
            .unwrap();
        let b = cli::build_price_source(&cfg, path)
            .unwrap()
            .fetch_prices()
            .unwrap();
        assert_eq!(a.len(), 40);
        assert_eq!(a, b);
        assert_eq!(a.points()[0].date, date(2023, 1, 1));
    }
}

mod commands {
    use super::*;

    #[test]
    fn backtest_writes_trade_log() {
        let (dir, ini_path) = workspace(CROSSOVER_INI, &[100.0, 102.0, 101.0, 105.0, 110.0]);
        let output = dir.path().join("trades.csv");

        cli::execute(Command::Backtest {
            config: ini_path,
            output: Some(output.clone()),
        })
        .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "strategy,date,kind,price,shares,liquidation");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "SMA crossover (1/2),2024-01-02,BUY,102.0,9,false");
        assert!(lines[4].ends_with("SELL,110.0,9,true"));
    }

    #[test]
    fn backtest_on_synthetic_prices() {
        let ini = "[backtest]\ninitial_capital = 5000\n\n[strategy]\nkind = macd\n\n[synthetic]\ndays = 120\nseed = 11\n";
        let file = write_temp_file(ini);
        cli::execute(Command::Backtest {
            config: file.path().to_path_buf(),
            output: None,
        })
        .unwrap();
    }

    #[test]
    fn backtest_with_short_series_is_insufficient_data() {
        let ini = "[backtest]\nprices = prices.csv\n\n[strategy]\nshort_window = 2\nlong_window = 10\n";
        let (_dir, ini_path) = workspace(ini, &[1.0, 2.0, 3.0]);
        let err = cli::execute(Command::Backtest {
            config: ini_path,
            output: None,
        })
        .unwrap_err();
        assert!(matches!(err, TraderError::InsufficientData { window: 10, len: 3 }));
    }

    #[test]
    fn missing_price_file_is_data_error() {
        let ini = "[backtest]\nprices = nowhere.csv\n";
        let file = write_temp_file(ini);
        let err = cli::execute(Command::Backtest {
            config: file.path().to_path_buf(),
            output: None,
        })
        .unwrap_err();
        assert!(matches!(err, TraderError::Data { .. }));
    }

    #[test]
    fn missing_config_file_is_parse_error() {
        let err = cli::execute(Command::Validate {
            config: PathBuf::from("/nonexistent/config.ini"),
        })
        .unwrap_err();
        assert!(matches!(err, TraderError::ConfigParse { .. }));
    }

    #[test]
    fn validate_accepts_good_config() {
        let file = write_temp_file(CROSSOVER_INI);
        cli::execute(Command::Validate {
            config: file.path().to_path_buf(),
        })
        .unwrap();
    }

    #[test]
    fn indicators_runs_over_csv_prices() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i % 7) as f64).collect();
        let (_dir, ini_path) = workspace(CROSSOVER_INI, &closes);
        cli::execute(Command::Indicators {
            config: ini_path,
            window: 5,
            k: 2.0,
        })
        .unwrap();
    }

    #[test]
    fn indicators_use_configured_macd_periods() {
        let ini = "[backtest]\nprices = prices.csv\n\n[strategy]\nkind = macd\nfast = 3\nslow = 5\nsignal = 2\n";
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 4) as f64).collect();
        let (_dir, ini_path) = workspace(ini, &closes);
        cli::execute(Command::Indicators {
            config: ini_path,
            window: 5,
            k: 2.0,
        })
        .unwrap();
    }

    #[test]
    fn indicators_reject_malformed_macd_period() {
        let ini = "[backtest]\nprices = prices.csv\n\n[strategy]\nfast = three\n";
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let (_dir, ini_path) = workspace(ini, &closes);
        let err = cli::execute(Command::Indicators {
            config: ini_path,
            window: 5,
            k: 2.0,
        })
        .unwrap_err();
        assert!(matches!(err, TraderError::ConfigInvalid { key, .. } if key == "fast"));
    }

    #[test]
    fn indicators_rejects_non_positive_k() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let (_dir, ini_path) = workspace(CROSSOVER_INI, &closes);
        let err = cli::execute(Command::Indicators {
            config: ini_path,
            window: 5,
            k: 0.0,
        })
        .unwrap_err();
        assert!(matches!(err, TraderError::InvalidParameter { .. }));
    }

    #[test]
    fn sweep_runs_grid() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + 5.0 * (i as f64 / 5.0).sin())
            .collect();
        let (_dir, ini_path) = workspace(CROSSOVER_INI, &closes);
        cli::execute(Command::Sweep {
            config: ini_path,
            short: vec![2, 4],
            long: vec![10, 20],
        })
        .unwrap();
    }

    #[test]
    fn sweep_without_valid_pairs_fails() {
        let (_dir, ini_path) = workspace(CROSSOVER_INI, &[1.0, 2.0, 3.0, 4.0]);
        let err = cli::execute(Command::Sweep {
            config: ini_path,
            short: vec![5],
            long: vec![3],
        })
        .unwrap_err();
        assert!(matches!(err, TraderError::InvalidParameter { .. }));
    }
}
