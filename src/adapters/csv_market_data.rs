//! CSV-backed market data adapter.
//!
//! Stands in for the external EOD provider: one `<SYMBOL>.csv` per symbol
//! under a data directory, header `date,open,high,low,close,volume`. The
//! lookback window is anchored at each file's most recent date, so no wall
//! clock is involved.

use crate::domain::candle::Candle;
use crate::domain::error::EodscanError;
use crate::ports::market_data_port::MarketDataPort;
use chrono::{Duration, NaiveDate};
use std::fs;
use std::path::PathBuf;

pub struct CsvMarketData {
    data_dir: PathBuf,
}

impl CsvMarketData {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol))
    }

    fn read_symbol(&self, symbol: &str) -> Result<Vec<Candle>, EodscanError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| EodscanError::Provider {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| EodscanError::Provider {
                reason: format!("{}: CSV parse error: {}", symbol, e),
            })?;

            let field = |idx: usize, name: &str| {
                record
                    .get(idx)
                    .ok_or_else(|| EodscanError::Provider {
                        reason: format!("{}: missing {} column", symbol, name),
                    })
            };

            let trade_date =
                NaiveDate::parse_from_str(field(0, "date")?, "%Y-%m-%d").map_err(|e| {
                    EodscanError::Provider {
                        reason: format!("{}: invalid date: {}", symbol, e),
                    }
                })?;

            let parse_f64 = |idx: usize, name: &str| -> Result<f64, EodscanError> {
                field(idx, name)?
                    .parse()
                    .map_err(|e| EodscanError::Provider {
                        reason: format!("{}: invalid {} value: {}", symbol, name, e),
                    })
            };

            let volume: i64 = field(5, "volume")?
                .parse()
                .map_err(|e| EodscanError::Provider {
                    reason: format!("{}: invalid volume value: {}", symbol, e),
                })?;

            candles.push(Candle {
                trade_date,
                symbol: symbol.to_string(),
                open: parse_f64(1, "open")?,
                high: parse_f64(2, "high")?,
                low: parse_f64(3, "low")?,
                close: parse_f64(4, "close")?,
                volume,
            });
        }

        candles.sort_by_key(|c| c.trade_date);
        candles.dedup_by_key(|c| c.trade_date);
        Ok(candles)
    }
}

impl MarketDataPort for CsvMarketData {
    fn fetch_daily(
        &self,
        symbols: &[String],
        lookback_days: u32,
    ) -> Result<Vec<Candle>, EodscanError> {
        let mut all = Vec::new();

        for symbol in symbols {
            if !self.csv_path(symbol).exists() {
                eprintln!("Warning: no data file for {}, skipping", symbol);
                continue;
            }

            let mut candles = self.read_symbol(symbol)?;

            if let Some(latest) = candles.last().map(|c| c.trade_date) {
                let cutoff = latest - Duration::days(i64::from(lookback_days));
                candles.retain(|c| c.trade_date >= cutoff);
            }

            all.extend(candles);
        }

        Ok(all)
    }
}
