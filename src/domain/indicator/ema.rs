//! Exponential Moving Average.
//!
//! alpha = 2/(span+1), seeded with the first observation, then
//! EMA[i] = C[i]*alpha + EMA[i-1]*(1-alpha). No look-ahead.

/// Latest EMA over the full close series, or `None` when the series is empty
/// or the span is zero.
pub fn latest_ema(closes: &[f64], span: usize) -> Option<f64> {
    if span == 0 {
        return None;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut ema = *closes.first()?;

    for &close in &closes[1..] {
        ema = close * alpha + ema * (1.0 - alpha);
    }

    Some(ema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ema_empty_series() {
        assert_eq!(latest_ema(&[], 20), None);
    }

    #[test]
    fn ema_zero_span() {
        assert_eq!(latest_ema(&[10.0, 20.0], 0), None);
    }

    #[test]
    fn ema_single_observation_is_seed() {
        assert_eq!(latest_ema(&[42.5], 20), Some(42.5));
    }

    #[test]
    fn ema_recursive_calculation() {
        // span 3 → alpha 0.5; seed 10, then 0.5*20 + 0.5*10 = 15,
        // then 0.5*30 + 0.5*15 = 22.5
        let ema = latest_ema(&[10.0, 20.0, 30.0], 3).unwrap();
        assert_relative_eq!(ema, 22.5);
    }

    #[test]
    fn ema_constant_prices() {
        let closes = vec![100.0; 60];
        assert_relative_eq!(latest_ema(&closes, 20).unwrap(), 100.0);
    }

    #[test]
    fn ema_weights_recent_observations() {
        let mut closes = vec![100.0; 59];
        closes.push(200.0);
        let fast = latest_ema(&closes, 20).unwrap();
        let slow = latest_ema(&closes, 50).unwrap();
        assert!(fast > slow, "shorter span should react faster: {fast} vs {slow}");
        assert!(fast > 100.0 && fast < 200.0);
    }

    #[test]
    fn ema_smoothing_factor() {
        let span = 20;
        let alpha = 2.0 / (span as f64 + 1.0);
        assert_relative_eq!(alpha, 2.0 / 21.0);
    }
}
