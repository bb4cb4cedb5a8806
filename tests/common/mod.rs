#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
pub use eodscan::domain::candle::Candle;
use eodscan::domain::error::EodscanError;
use eodscan::ports::market_data_port::MarketDataPort;
use std::collections::HashMap;

pub struct MockMarketData {
    pub data: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.data.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketData {
    fn fetch_daily(
        &self,
        symbols: &[String],
        _lookback_days: u32,
    ) -> Result<Vec<Candle>, EodscanError> {
        let mut all = Vec::new();
        for symbol in symbols {
            if let Some(reason) = self.errors.get(symbol) {
                return Err(EodscanError::Provider {
                    reason: reason.clone(),
                });
            }
            if let Some(candles) = self.data.get(symbol) {
                all.extend(candles.iter().cloned());
            }
        }
        Ok(all)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_candle(symbol: &str, trade_date: &str, close: f64) -> Candle {
    Candle {
        trade_date: NaiveDate::parse_from_str(trade_date, "%Y-%m-%d").unwrap(),
        symbol: symbol.to_string(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// `count` daily candles from `start_date`, closes following `close_fn(i)`.
pub fn generate_candles(
    symbol: &str,
    start_date: &str,
    count: usize,
    close_fn: impl Fn(usize) -> f64,
) -> Vec<Candle> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let close = close_fn(i);
            Candle {
                trade_date: start + Duration::days(i as i64),
                symbol: symbol.to_string(),
                open: close - 1.0,
                high: close + 1.0,
                low: close - 2.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Closes that oscillate around a level; keeps RSI defined and mid-range.
pub fn oscillating_closes(base: f64) -> impl Fn(usize) -> f64 {
    move |i| base + (i % 5) as f64 * 2.0
}

/// Strictly rising closes; trailing losses are zero so RSI is undefined.
pub fn rising_closes(base: f64) -> impl Fn(usize) -> f64 {
    move |i| base + i as f64
}
