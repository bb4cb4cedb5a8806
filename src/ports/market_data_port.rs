//! External market data provider boundary.

use crate::domain::candle::Candle;
use crate::domain::error::EodscanError;

/// Source of end-of-day candles for a symbol universe.
///
/// Implementations guarantee at most one candle per (trade_date, symbol)
/// within the trailing `lookback_days` window. Symbols the provider cannot
/// serve are skipped with a warning rather than failing the whole fetch.
pub trait MarketDataPort {
    fn fetch_daily(
        &self,
        symbols: &[String],
        lookback_days: u32,
    ) -> Result<Vec<Candle>, EodscanError>;
}
