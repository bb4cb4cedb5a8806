//! End-of-day pipeline stages and orchestration.
//!
//! Data flows one way: provider → raw prices → indicator snapshots →
//! screener signals. Each stage takes its collaborators explicitly, commits
//! its writes as one batch, and reports counts. Skips and empty inputs are
//! status lines, never errors; only persistence failures propagate.

use crate::domain::candle::Candle;
use crate::domain::error::EodscanError;
use crate::domain::indicator::{self, IndicatorSnapshot, MIN_CANDLES};
use crate::domain::screener;
use crate::domain::universe::Universe;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::store_port::StorePort;

#[derive(Debug, Clone, Default)]
pub struct RefreshSummary {
    pub symbols_requested: usize,
    pub candles_upserted: usize,
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorSummary {
    pub snapshots_stored: usize,
    pub symbols_skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScreenerSummary {
    pub rows_evaluated: usize,
    pub rows_filtered: usize,
    pub signals_stored: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EodReport {
    pub refresh: RefreshSummary,
    pub indicators: IndicatorSummary,
    pub screeners: ScreenerSummary,
}

/// Stage 1: pull the latest daily candles and upsert them into the store.
pub fn refresh_prices(
    provider: &dyn MarketDataPort,
    store: &dyn StorePort,
    universe: &Universe,
    lookback_days: u32,
) -> Result<RefreshSummary, EodscanError> {
    let candles = provider.fetch_daily(&universe.symbols, lookback_days)?;

    if candles.is_empty() {
        eprintln!("No candles returned by provider; price store unchanged");
        return Ok(RefreshSummary {
            symbols_requested: universe.count(),
            candles_upserted: 0,
        });
    }

    store.upsert_candles(&candles)?;
    eprintln!(
        "Upserted {} candles for {} requested symbols",
        candles.len(),
        universe.count()
    );

    Ok(RefreshSummary {
        symbols_requested: universe.count(),
        candles_upserted: candles.len(),
    })
}

/// Stage 2: compute one latest-day snapshot per symbol with enough history.
pub fn compute_indicators(store: &dyn StorePort) -> Result<IndicatorSummary, EodscanError> {
    let symbols = store.list_symbols()?;

    if symbols.is_empty() {
        eprintln!("No raw price data found; skipping indicators");
        return Ok(IndicatorSummary::default());
    }

    let mut snapshots: Vec<IndicatorSnapshot> = Vec::with_capacity(symbols.len());
    let mut skipped = 0usize;

    for symbol in &symbols {
        let mut candles: Vec<Candle> = store.fetch_candles(symbol)?;
        candles.retain(Candle::is_usable);

        match indicator::compute_snapshot(&candles) {
            Some(snapshot) => snapshots.push(snapshot),
            None => {
                eprintln!(
                    "Skipping {}: only {} usable candles, minimum {} required",
                    symbol,
                    candles.len(),
                    MIN_CANDLES
                );
                skipped += 1;
            }
        }
    }

    if !snapshots.is_empty() {
        store.upsert_snapshots(&snapshots)?;
    }
    eprintln!(
        "Indicators stored for {} symbols ({} skipped)",
        snapshots.len(),
        skipped
    );

    Ok(IndicatorSummary {
        snapshots_stored: snapshots.len(),
        symbols_skipped: skipped,
    })
}

/// Stage 3: evaluate screener rules over the joined view and persist signals.
pub fn run_screeners(store: &dyn StorePort) -> Result<ScreenerSummary, EodscanError> {
    let rows = store.fetch_screener_rows()?;

    if rows.is_empty() {
        eprintln!("No indicator data found; skipping screeners");
        return Ok(ScreenerSummary::default());
    }

    let filtered = rows
        .iter()
        .filter(|r| r.rsi.is_none() || r.close.is_none())
        .count();

    let signals = screener::evaluate_rows(&rows);

    if signals.is_empty() {
        eprintln!(
            "No swing signals today ({} rows evaluated, {} null-filtered)",
            rows.len(),
            filtered
        );
    } else {
        store.upsert_signals(&signals)?;
        eprintln!("Generated {} swing trade signals", signals.len());
    }

    Ok(ScreenerSummary {
        rows_evaluated: rows.len(),
        rows_filtered: filtered,
        signals_stored: signals.len(),
    })
}

/// Full EOD run: refresh → indicators → screeners.
///
/// Stages commit independently; a failure in a later stage leaves earlier
/// commits in place.
pub fn run_eod(
    provider: &dyn MarketDataPort,
    store: &dyn StorePort,
    universe: &Universe,
    lookback_days: u32,
) -> Result<EodReport, EodscanError> {
    eprintln!("Starting EOD pipeline");

    let refresh = refresh_prices(provider, store, universe, lookback_days)?;
    let indicators = compute_indicators(store)?;
    let screeners = run_screeners(store)?;

    eprintln!("EOD pipeline completed");

    Ok(EodReport {
        refresh,
        indicators,
        screeners,
    })
}
