//! The key-value storage primitive.
//!
//! Keys and values are opaque strings at this layer; callers choose the
//! encoding (everything in this crate stores JSON). No delete: catalog
//! entities are immutable post-seed and requests are retained for audit.
//!
//! These helpers take a live connection and assume the caller serializes
//! access (in this crate, always via [`KvBroker::with_conn`]).
//!
//! [`KvBroker::with_conn`]: crate::core::broker::KvBroker::with_conn

use crate::core::error;
use crate::core::schemas;
use rusqlite::{Connection, OptionalExtension};

pub fn ensure_schema(conn: &Connection) -> Result<(), error::StockpingError> {
    conn.execute(schemas::KV_SCHEMA, [])?;
    Ok(())
}

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>, error::StockpingError> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM kv WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(error::StockpingError::StorageUnavailable)?;
    Ok(value)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<(), error::StockpingError> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        rusqlite::params![key, value],
    )?;
    Ok(())
}

/// Writes only when the key is absent. Returns true if this call created it.
pub fn set_if_absent(
    conn: &Connection,
    key: &str,
    value: &str,
) -> Result<bool, error::StockpingError> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO kv (key, value) VALUES (?1, ?2)",
        rusqlite::params![key, value],
    )?;
    Ok(changed > 0)
}

/// Replaces the value only if the stored value still equals `expected`.
/// Returns true if the swap happened; false means another writer got there
/// first and the caller should re-read.
pub fn compare_and_set(
    conn: &Connection,
    key: &str,
    expected: &str,
    value: &str,
) -> Result<bool, error::StockpingError> {
    let changed = conn.execute(
        "UPDATE kv SET value = ?3 WHERE key = ?1 AND value = ?2",
        rusqlite::params![key, expected, value],
    )?;
    Ok(changed > 0)
}
