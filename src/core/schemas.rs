//! Storage layout for the stockping key-value engine.
//!
//! One sqlite database holds a single `kv` table; every persisted record is
//! a JSON value under a prefixed string key. Higher layers own the typed
//! encode/decode; this module is the single place the layout is spelled out.

pub const CATALOG_DB_NAME: &str = "catalog.db";
pub const KV_EVENTS_NAME: &str = "kv.events.jsonl";

pub const KV_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
";

/// Sentinel marking the one-time fixture seed as complete.
pub const SEED_SENTINEL_KEY: &str = "products_initialized";

pub fn product_key(id: &str) -> String {
    format!("product:{}", id)
}

pub fn store_key(id: &str) -> String {
    format!("store:{}", id)
}

pub fn category_index_key(category: &str) -> String {
    format!("category_index:{}", category)
}

pub fn store_category_index_key(category: &str) -> String {
    format!("store_category_index:{}", category)
}

pub fn request_key(id: &str) -> String {
    format!("request:{}", id)
}
