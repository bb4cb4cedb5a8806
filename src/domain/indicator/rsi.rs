//! Relative Strength Index.
//!
//! Trailing simple averages of gains/losses over the last `period`
//! close-to-close changes (not Wilder's smoothing):
//! RSI = 100 - 100/(1 + avg_gain/avg_loss).
//!
//! Undefined when avg_loss is zero — callers get `None`, never an
//! infinity artifact.

/// Latest RSI over the close series, or `None` when there are fewer than
/// `period + 1` closes or no losing periods in the window.
pub fn latest_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let window = &closes[closes.len() - (period + 1)..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for pair in window.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += -change;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return None;
    }

    Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}
