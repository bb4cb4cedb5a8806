//! Technical indicator snapshots.
//!
//! Each symbol's full daily history collapses into at most one
//! [`IndicatorSnapshot`] dated to the latest candle. Intermediate values
//! along the series are working state and are never persisted.

pub mod atr;
pub mod ema;
pub mod rsi;

use crate::domain::candle::Candle;
use chrono::NaiveDate;

pub use atr::latest_atr;
pub use ema::latest_ema;
pub use rsi::latest_rsi;

/// Minimum usable candles before a symbol gets a snapshot.
pub const MIN_CANDLES: usize = 50;

pub const EMA_FAST_SPAN: usize = 20;
pub const EMA_SLOW_SPAN: usize = 50;
pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

/// One end-of-day indicator row per (trade_date, symbol).
///
/// `rsi` is `None` when the trailing average loss is zero; the other
/// fields are always present once the history minimum is met.
#[derive(Debug, Clone)]
pub struct IndicatorSnapshot {
    pub trade_date: NaiveDate,
    pub symbol: String,
    pub rsi: Option<f64>,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    pub atr: Option<f64>,
}

/// Compute the latest-day snapshot for one symbol.
///
/// `candles` must be the symbol's usable history in ascending date order.
/// Returns `None` when the history is shorter than [`MIN_CANDLES`]; the
/// caller reports such symbols as skipped, not failed.
pub fn compute_snapshot(candles: &[Candle]) -> Option<IndicatorSnapshot> {
    if candles.len() < MIN_CANDLES {
        return None;
    }

    let latest = candles.last()?;
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    Some(IndicatorSnapshot {
        trade_date: latest.trade_date,
        symbol: latest.symbol.clone(),
        rsi: latest_rsi(&closes, RSI_PERIOD),
        ema20: latest_ema(&closes, EMA_FAST_SPAN),
        ema50: latest_ema(&closes, EMA_SLOW_SPAN),
        atr: latest_atr(candles, ATR_PERIOD),
    })
}
