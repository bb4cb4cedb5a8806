//! Swing-trade screener rules and signal evaluation.
//!
//! Each rule is a pure predicate over one joined indicator+price row. Rules
//! are null-safe: a missing input makes the rule false, it never panics.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Named screener strategies with fixed scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    PullbackUptrend,
    MomentumBreakout,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::PullbackUptrend, Strategy::MomentumBreakout];

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::PullbackUptrend => "PULLBACK_UPTREND",
            Strategy::MomentumBreakout => "MOMENTUM_BREAKOUT",
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Strategy::PullbackUptrend => 1.0,
            Strategy::MomentumBreakout => 1.2,
        }
    }

    pub fn matches(&self, row: &ScreenerRow) -> bool {
        match self {
            Strategy::PullbackUptrend => pullback_in_uptrend(row),
            Strategy::MomentumBreakout => momentum_breakout(row),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PULLBACK_UPTREND" => Ok(Strategy::PullbackUptrend),
            "MOMENTUM_BREAKOUT" => Ok(Strategy::MomentumBreakout),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Indicator snapshot joined with the matching raw close.
///
/// Every value field is optional: the store may hold null indicator columns,
/// and the join may miss a price row.
#[derive(Debug, Clone)]
pub struct ScreenerRow {
    pub trade_date: NaiveDate,
    pub symbol: String,
    pub rsi: Option<f64>,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    pub atr: Option<f64>,
    pub close: Option<f64>,
}

/// One screener match for one symbol on one date.
#[derive(Debug, Clone)]
pub struct Signal {
    pub trade_date: NaiveDate,
    pub symbol: String,
    pub strategy: Strategy,
    pub score: f64,
    pub close: f64,
}

/// Pullback in an uptrend: price above EMA50, EMA20 above EMA50,
/// RSI in the 40-60 band.
fn pullback_in_uptrend(row: &ScreenerRow) -> bool {
    match (row.close, row.ema20, row.ema50, row.rsi) {
        (Some(close), Some(ema20), Some(ema50), Some(rsi)) => {
            close > ema50 && ema20 > ema50 && (40.0..=60.0).contains(&rsi)
        }
        _ => false,
    }
}

/// Momentum continuation: RSI above 60 with price above EMA20.
fn momentum_breakout(row: &ScreenerRow) -> bool {
    match (row.close, row.ema20, row.rsi) {
        (Some(close), Some(ema20), Some(rsi)) => rsi > 60.0 && close > ema20,
        _ => false,
    }
}

/// Evaluate every strategy against every row.
///
/// Rows missing rsi or close are dropped up front since no rule can fire
/// without them; a missing ema field only silences the rules that read it.
/// A row may yield zero, one, or both signals.
pub fn evaluate_rows(rows: &[ScreenerRow]) -> Vec<Signal> {
    let mut signals = Vec::new();

    for row in rows {
        let (Some(_), Some(close)) = (row.rsi, row.close) else {
            continue;
        };

        for strategy in Strategy::ALL {
            if strategy.matches(row) {
                signals.push(Signal {
                    trade_date: row.trade_date,
                    symbol: row.symbol.clone(),
                    strategy,
                    score: strategy.score(),
                    close,
                });
            }
        }
    }

    signals
}
