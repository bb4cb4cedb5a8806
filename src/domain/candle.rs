//! Daily OHLCV candle representation.

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Candle {
    pub trade_date: NaiveDate,
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl Candle {
    /// |high - low|, the simplified true range used by ATR.
    pub fn range(&self) -> f64 {
        (self.high - self.low).abs()
    }

    /// All price fields finite and volume non-negative.
    pub fn is_usable(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle() -> Candle {
        Candle {
            trade_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            symbol: "AAPL".into(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000,
        }
    }

    #[test]
    fn range_is_high_minus_low() {
        let candle = sample_candle();
        assert!((candle.range() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn range_is_absolute() {
        let mut candle = sample_candle();
        candle.high = 90.0;
        candle.low = 110.0;
        assert!((candle.range() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn usable_candle() {
        assert!(sample_candle().is_usable());
    }

    #[test]
    fn nan_close_is_unusable() {
        let mut candle = sample_candle();
        candle.close = f64::NAN;
        assert!(!candle.is_usable());
    }

    #[test]
    fn negative_volume_is_unusable() {
        let mut candle = sample_candle();
        candle.volume = -1;
        assert!(!candle.is_usable());
    }
}
