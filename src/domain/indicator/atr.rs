//! Average True Range, simplified.
//!
//! Trailing simple average of |high - low| over the last `period` candles.
//! The previous close is deliberately not incorporated; this matches the
//! snapshot the rest of the pipeline was built against.

use crate::domain::candle::Candle;

/// Latest ATR over the candle series, or `None` when there are fewer than
/// `period` candles.
pub fn latest_atr(candles: &[Candle], period: usize) -> Option<f64> {
    if period == 0 || candles.len() < period {
        return None;
    }

    let window = &candles[candles.len() - period..];
    let sum: f64 = window.iter().map(Candle::range).sum();
    Some(sum / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_candle(day: u32, high: f64, low: f64) -> Candle {
        Candle {
            trade_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            symbol: "TEST".into(),
            open: low,
            high,
            low,
            close: high,
            volume: 1000,
        }
    }

    #[test]
    fn atr_empty_series() {
        assert_eq!(latest_atr(&[], 14), None);
    }

    #[test]
    fn atr_zero_period() {
        let candles = vec![make_candle(1, 110.0, 90.0)];
        assert_eq!(latest_atr(&candles, 0), None);
    }

    #[test]
    fn atr_insufficient_candles() {
        let candles: Vec<Candle> = (1..=13).map(|d| make_candle(d, 110.0, 90.0)).collect();
        assert_eq!(latest_atr(&candles, 14), None);
    }

    #[test]
    fn atr_constant_range() {
        let candles: Vec<Candle> = (1..=20).map(|d| make_candle(d, 110.0, 90.0)).collect();
        assert_relative_eq!(latest_atr(&candles, 14).unwrap(), 20.0);
    }

    #[test]
    fn atr_uses_trailing_window_only() {
        // 6 wide-range candles followed by 14 candles with range 10
        let mut candles: Vec<Candle> = (1..=6).map(|d| make_candle(d, 200.0, 100.0)).collect();
        candles.extend((7..=20).map(|d| make_candle(d, 105.0, 95.0)));
        assert_relative_eq!(latest_atr(&candles, 14).unwrap(), 10.0);
    }

    #[test]
    fn atr_averages_mixed_ranges() {
        // 7 candles with range 10, 7 with range 20 → mean 15
        let mut candles: Vec<Candle> = (1..=7).map(|d| make_candle(d, 105.0, 95.0)).collect();
        candles.extend((8..=14).map(|d| make_candle(d, 110.0, 90.0)));
        assert_relative_eq!(latest_atr(&candles, 14).unwrap(), 15.0);
    }
}
