//! Persistent store port trait.
//!
//! The store is an explicit collaborator handed to each pipeline stage, so
//! tests can substitute an in-memory implementation. Price and indicator
//! writes are keyed upserts; signal writes are keyed upserts too, keeping
//! screener re-runs idempotent.

use crate::domain::candle::Candle;
use crate::domain::error::EodscanError;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::screener::{ScreenerRow, Signal};
use chrono::NaiveDate;

pub trait StorePort {
    fn initialize_schema(&self) -> Result<(), EodscanError>;

    /// Insert-or-replace candles keyed by (trade_date, symbol), one transaction.
    fn upsert_candles(&self, candles: &[Candle]) -> Result<(), EodscanError>;

    /// Distinct symbols present in the price table, sorted.
    fn list_symbols(&self) -> Result<Vec<String>, EodscanError>;

    /// Full candle history for one symbol in ascending date order.
    fn fetch_candles(&self, symbol: &str) -> Result<Vec<Candle>, EodscanError>;

    /// Insert-or-replace snapshots keyed by (trade_date, symbol), one transaction.
    fn upsert_snapshots(&self, snapshots: &[IndicatorSnapshot]) -> Result<(), EodscanError>;

    /// Indicator rows joined with the matching raw close on (trade_date, symbol).
    fn fetch_screener_rows(&self) -> Result<Vec<ScreenerRow>, EodscanError>;

    /// Insert-or-replace signals keyed by (trade_date, symbol, strategy).
    fn upsert_signals(&self, signals: &[Signal]) -> Result<(), EodscanError>;

    /// Persisted signals, optionally restricted to one trade date.
    fn fetch_signals(&self, trade_date: Option<NaiveDate>) -> Result<Vec<Signal>, EodscanError>;
}
