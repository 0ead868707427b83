//! Storage layer for qualification reports.
//!
//! Persists the roster and per-driver lap timings produced by
//! [`f1q_core::build_report`] using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Use one `Database` per thread or wrap it in a `Mutex`.
//!
//! # Schema
//!
//! - `drivers`: one row per driver code.
//! - `qualifications`: one lap per driver, deleted with its driver.
//!
//! Timestamps are stored as TEXT in the timing-log pattern with microseconds
//! (e.g. `2018-05-24_12:02:58.917000`), which sorts chronologically.

use std::path::Path;

use chrono::NaiveDateTime;
use f1q_core::{LapResult, Participant};
use rusqlite::{Connection, params};
use thiserror::Error;

/// Storage format for lap timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S%.6f";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored timestamp could not be decoded.
    #[error("invalid {column} timestamp for driver {code}: {value}")]
    TimestampParse {
        code: String,
        column: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

/// A stored qualification lap.
#[derive(Debug, Clone, PartialEq)]
pub struct LapRecord {
    pub driver_code: String,
    pub start: NaiveDateTime,
    pub stop: NaiveDateTime,
    /// Lap time in seconds.
    pub lap_time: f64,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS drivers (
                code TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                car TEXT NOT NULL
            );

            -- start/stop: '%Y-%m-%d_%H:%M:%S.ffffff'
            -- lap_time: seconds, negative for inconsistent logs
            CREATE TABLE IF NOT EXISTS qualifications (
                driver_code TEXT PRIMARY KEY,
                start TEXT NOT NULL,
                stop TEXT NOT NULL,
                lap_time REAL NOT NULL,
                FOREIGN KEY (driver_code) REFERENCES drivers(code) ON DELETE CASCADE
            );
            ",
        )?;
        Ok(())
    }

    /// Inserts drivers, ignoring codes that are already stored.
    pub fn store_drivers(&mut self, drivers: &[Participant]) -> Result<usize, DbError> {
        if drivers.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO drivers (code, name, car) VALUES (?, ?, ?)")?;
            for driver in drivers {
                inserted += stmt.execute(params![driver.code, driver.name, driver.car])?;
            }
        }
        tx.commit()?;
        tracing::debug!(inserted, total = drivers.len(), "stored drivers");
        Ok(inserted)
    }

    /// Inserts laps, ignoring drivers that already have one stored.
    ///
    /// Every lap's driver must already be stored.
    pub fn store_laps(&mut self, laps: &[LapResult]) -> Result<usize, DbError> {
        if laps.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT OR IGNORE INTO qualifications (driver_code, start, stop, lap_time)
                VALUES (?, ?, ?, ?)
                ",
            )?;
            for lap in laps {
                inserted += stmt.execute(params![
                    lap.code,
                    format_timestamp(lap.start),
                    format_timestamp(lap.stop),
                    lap.elapsed,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(inserted, total = laps.len(), "stored laps");
        Ok(inserted)
    }

    /// Lists stored drivers ordered by code.
    pub fn list_drivers(&self) -> Result<Vec<Participant>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT code, name, car FROM drivers ORDER BY code ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Participant {
                code: row.get(0)?,
                name: row.get(1)?,
                car: row.get(2)?,
            })
        })?;
        let mut drivers = Vec::new();
        for row in rows {
            drivers.push(row?);
        }
        Ok(drivers)
    }

    /// Lists stored laps ordered by driver code.
    pub fn list_laps(&self) -> Result<Vec<LapRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT driver_code, start, stop, lap_time
            FROM qualifications
            ORDER BY driver_code ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
            ))
        })?;

        let mut laps = Vec::new();
        for row in rows {
            let (driver_code, start, stop, lap_time) = row?;
            let start = parse_timestamp(&driver_code, "start", start)?;
            let stop = parse_timestamp(&driver_code, "stop", stop)?;
            laps.push(LapRecord {
                driver_code,
                start,
                stop,
                lap_time,
            });
        }
        Ok(laps)
    }

    /// Deletes a driver and, through the foreign key, their lap.
    ///
    /// Returns whether a driver was deleted.
    pub fn delete_driver(&self, code: &str) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM drivers WHERE code = ?", [code])?;
        Ok(deleted > 0)
    }
}

fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(code: &str, column: &'static str, value: String) -> Result<NaiveDateTime, DbError> {
    NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT).map_err(|source| {
        DbError::TimestampParse {
            code: code.to_string(),
            column,
            value,
            source,
        }
    })
}
