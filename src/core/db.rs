use crate::core::error;
use crate::core::schemas;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub fn db_connect(db_path: &str) -> Result<Connection, error::StockpingError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(error::StockpingError::StorageUnavailable)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(error::StockpingError::StorageUnavailable)?;
    Ok(conn)
}

pub fn catalog_db_path(root: &Path) -> PathBuf {
    root.join(schemas::CATALOG_DB_NAME)
}
