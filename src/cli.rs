//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_market_data::CsvMarketData;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sqlite_store::SqliteStore;
use crate::domain::error::EodscanError;
use crate::domain::pipeline;
use crate::domain::universe::{parse_symbols, Universe};
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "eodscan", about = "End-of-day stock screener pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full EOD pipeline: fetch, indicators, screeners
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Create the store schema
    InitDb {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Refresh raw prices from the market data provider
    Fetch {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Compute indicator snapshots from stored prices
    Indicators {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Evaluate screeners and persist signals
    Screen {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List persisted signals
    Signals {
        #[arg(short, long)]
        config: PathBuf,
        /// Restrict to one trade date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config } => run_pipeline(&config),
        Command::InitDb { config } => run_init_db(&config),
        Command::Fetch { config } => run_fetch(&config),
        Command::Indicators { config } => run_indicators(&config),
        Command::Screen { config } => run_screen(&config),
        Command::Signals { config, date } => run_signals(&config, date.as_deref()),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = EodscanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn open_store(config: &dyn ConfigPort) -> Result<SqliteStore, ExitCode> {
    let store = SqliteStore::from_config(config).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    store.initialize_schema().map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    Ok(store)
}

fn build_provider(config: &dyn ConfigPort) -> Result<CsvMarketData, ExitCode> {
    let data_dir = config.get_string("provider", "data_dir").ok_or_else(|| {
        let err = EodscanError::ConfigMissing {
            section: "provider".into(),
            key: "data_dir".into(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })?;
    Ok(CsvMarketData::new(PathBuf::from(data_dir)))
}

fn build_universe(config: &dyn ConfigPort) -> Result<Universe, ExitCode> {
    let symbols_str = config.get_string("universe", "symbols").ok_or_else(|| {
        let err = EodscanError::ConfigMissing {
            section: "universe".into(),
            key: "symbols".into(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })?;

    let symbols = parse_symbols(&symbols_str).map_err(|e| {
        let err = EodscanError::ConfigInvalid {
            section: "universe".into(),
            key: "symbols".into(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })?;

    Ok(Universe { symbols })
}

fn lookback_days(config: &dyn ConfigPort) -> u32 {
    config.get_int("universe", "lookback_days", 120).max(0) as u32
}

fn run_pipeline(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let universe = match build_universe(&config) {
        Ok(u) => u,
        Err(code) => return code,
    };
    let provider = match build_provider(&config) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match pipeline::run_eod(&provider, &store, &universe, lookback_days(&config)) {
        Ok(report) => {
            eprintln!(
                "Summary: {} candles upserted, {} snapshots stored ({} symbols skipped), {} signals",
                report.refresh.candles_upserted,
                report.indicators.snapshots_stored,
                report.indicators.symbols_skipped,
                report.screeners.signals_stored,
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_init_db(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match open_store(&config) {
        Ok(_) => {
            eprintln!("Store schema initialized");
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}

fn run_fetch(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let universe = match build_universe(&config) {
        Ok(u) => u,
        Err(code) => return code,
    };
    let provider = match build_provider(&config) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match pipeline::refresh_prices(&provider, &store, &universe, lookback_days(&config)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_indicators(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match pipeline::compute_indicators(&store) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_screen(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match pipeline::run_screeners(&store) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_signals(config_path: &PathBuf, date: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let trade_date = match date {
        Some(s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                eprintln!("error: invalid date {} (expected YYYY-MM-DD)", s);
                return ExitCode::from(2);
            }
        },
        None => None,
    };

    match store.fetch_signals(trade_date) {
        Ok(signals) => {
            if signals.is_empty() {
                eprintln!("No signals found");
            } else {
                for signal in &signals {
                    println!(
                        "{} {} {} score={:.1} close={:.2}",
                        signal.trade_date,
                        signal.symbol,
                        signal.strategy,
                        signal.score,
                        signal.close
                    );
                }
                eprintln!("{} signals", signals.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}
