//! SQLite store adapter.
//!
//! One pooled connection per stage call; each write method runs in its own
//! transaction so a stage's batch commits atomically.

use crate::domain::candle::Candle;
use crate::domain::error::EodscanError;
use crate::domain::indicator::IndicatorSnapshot;
use crate::domain::screener::{ScreenerRow, Signal, Strategy};
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;
use chrono::NaiveDate;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

const DATE_FMT: &str = "%Y-%m-%d";

pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, EodscanError> {
        let db_path =
            config
                .get_string("store", "path")
                .ok_or_else(|| EodscanError::ConfigMissing {
                    section: "store".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("store", "pool_size", 4) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(|e: r2d2::Error| EodscanError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, EodscanError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| EodscanError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    fn conn(
        &self,
    ) -> Result<r2d2::PooledConnection<SqliteConnectionManager>, EodscanError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| EodscanError::Database {
                reason: e.to_string(),
            })
    }
}

fn query_err(e: rusqlite::Error) -> EodscanError {
    EodscanError::DatabaseQuery {
        reason: e.to_string(),
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(date_str, DATE_FMT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            date_str.len(),
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

impl StorePort for SqliteStore {
    fn initialize_schema(&self) -> Result<(), EodscanError> {
        let conn = self.conn()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS raw_prices (
                trade_date TEXT NOT NULL,
                symbol TEXT NOT NULL,
                open REAL NOT NULL,
                high REAL NOT NULL,
                low REAL NOT NULL,
                close REAL NOT NULL,
                volume INTEGER NOT NULL,
                PRIMARY KEY (trade_date, symbol)
            );
            CREATE INDEX IF NOT EXISTS idx_raw_prices_symbol ON raw_prices(symbol);
            CREATE TABLE IF NOT EXISTS indicators (
                trade_date TEXT NOT NULL,
                symbol TEXT NOT NULL,
                rsi REAL,
                ema20 REAL,
                ema50 REAL,
                atr REAL,
                PRIMARY KEY (trade_date, symbol)
            );
            CREATE TABLE IF NOT EXISTS signals (
                trade_date TEXT NOT NULL,
                symbol TEXT NOT NULL,
                strategy TEXT NOT NULL,
                score REAL NOT NULL,
                close REAL NOT NULL,
                PRIMARY KEY (trade_date, symbol, strategy)
            );",
        )
        .map_err(query_err)?;

        Ok(())
    }

    fn upsert_candles(&self, candles: &[Candle]) -> Result<(), EodscanError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_err)?;

        for candle in candles {
            tx.execute(
                "INSERT OR REPLACE INTO raw_prices
                 (trade_date, symbol, open, high, low, close, volume)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    candle.trade_date.format(DATE_FMT).to_string(),
                    candle.symbol,
                    candle.open,
                    candle.high,
                    candle.low,
                    candle.close,
                    candle.volume
                ],
            )
            .map_err(query_err)?;
        }

        tx.commit().map_err(query_err)
    }

    fn list_symbols(&self) -> Result<Vec<String>, EodscanError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare("SELECT DISTINCT symbol FROM raw_prices ORDER BY symbol")
            .map_err(query_err)?;

        let rows = stmt.query_map([], |row| row.get(0)).map_err(query_err)?;

        let mut symbols = Vec::new();
        for row in rows {
            symbols.push(row.map_err(query_err)?);
        }

        Ok(symbols)
    }

    fn fetch_candles(&self, symbol: &str) -> Result<Vec<Candle>, EodscanError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT trade_date, symbol, open, high, low, close, volume
                 FROM raw_prices WHERE symbol = ?1 ORDER BY trade_date ASC",
            )
            .map_err(query_err)?;

        let rows = stmt
            .query_map(params![symbol], |row| {
                let date_str: String = row.get(0)?;
                Ok(Candle {
                    trade_date: parse_date(&date_str)?,
                    symbol: row.get(1)?,
                    open: row.get(2)?,
                    high: row.get(3)?,
                    low: row.get(4)?,
                    close: row.get(5)?,
                    volume: row.get(6)?,
                })
            })
            .map_err(query_err)?;

        let mut candles = Vec::new();
        for row in rows {
            candles.push(row.map_err(query_err)?);
        }

        Ok(candles)
    }

    fn upsert_snapshots(&self, snapshots: &[IndicatorSnapshot]) -> Result<(), EodscanError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_err)?;

        for snapshot in snapshots {
            tx.execute(
                "INSERT OR REPLACE INTO indicators
                 (trade_date, symbol, rsi, ema20, ema50, atr)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    snapshot.trade_date.format(DATE_FMT).to_string(),
                    snapshot.symbol,
                    snapshot.rsi,
                    snapshot.ema20,
                    snapshot.ema50,
                    snapshot.atr
                ],
            )
            .map_err(query_err)?;
        }

        tx.commit().map_err(query_err)
    }

    fn fetch_screener_rows(&self) -> Result<Vec<ScreenerRow>, EodscanError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT i.trade_date, i.symbol, i.rsi, i.ema20, i.ema50, i.atr, r.close
                 FROM indicators i
                 LEFT JOIN raw_prices r
                   ON i.trade_date = r.trade_date AND i.symbol = r.symbol
                 ORDER BY i.symbol, i.trade_date",
            )
            .map_err(query_err)?;

        let rows = stmt
            .query_map([], |row| {
                let date_str: String = row.get(0)?;
                Ok(ScreenerRow {
                    trade_date: parse_date(&date_str)?,
                    symbol: row.get(1)?,
                    rsi: row.get(2)?,
                    ema20: row.get(3)?,
                    ema50: row.get(4)?,
                    atr: row.get(5)?,
                    close: row.get(6)?,
                })
            })
            .map_err(query_err)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(query_err)?);
        }

        Ok(out)
    }

    fn upsert_signals(&self, signals: &[Signal]) -> Result<(), EodscanError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_err)?;

        for signal in signals {
            tx.execute(
                "INSERT OR REPLACE INTO signals
                 (trade_date, symbol, strategy, score, close)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    signal.trade_date.format(DATE_FMT).to_string(),
                    signal.symbol,
                    signal.strategy.label(),
                    signal.score,
                    signal.close
                ],
            )
            .map_err(query_err)?;
        }

        tx.commit().map_err(query_err)
    }

    fn fetch_signals(&self, trade_date: Option<NaiveDate>) -> Result<Vec<Signal>, EodscanError> {
        let conn = self.conn()?;

        let base = "SELECT trade_date, symbol, strategy, score, close FROM signals";
        let order = " ORDER BY trade_date, symbol, strategy";

        let map_row = |row: &rusqlite::Row<'_>| {
            let date_str: String = row.get(0)?;
            let strategy_str: String = row.get(2)?;
            let strategy: Strategy = strategy_str.parse().map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(
                    strategy_str.len(),
                    rusqlite::types::Type::Text,
                    e.into(),
                )
            })?;
            Ok(Signal {
                trade_date: parse_date(&date_str)?,
                symbol: row.get(1)?,
                strategy,
                score: row.get(3)?,
                close: row.get(4)?,
            })
        };

        let mut out = Vec::new();
        match trade_date {
            Some(date) => {
                let query = format!("{base} WHERE trade_date = ?1{order}");
                let mut stmt = conn.prepare(&query).map_err(query_err)?;
                let rows = stmt
                    .query_map(params![date.format(DATE_FMT).to_string()], map_row)
                    .map_err(query_err)?;
                for row in rows {
                    out.push(row.map_err(query_err)?);
                }
            }
            None => {
                let query = format!("{base}{order}");
                let mut stmt = conn.prepare(&query).map_err(query_err)?;
                let rows = stmt.query_map([], map_row).map_err(query_err)?;
                for row in rows {
                    out.push(row.map_err(query_err)?);
                }
            }
        }

        Ok(out)
    }
}
