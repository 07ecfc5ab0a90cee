//! Category-indexed catalog over the key-value store.
//!
//! Products and stores are seeded exactly once per workspace and are
//! immutable afterwards. Each entity lives under its own key
//! (`product:{id}`, `store:{id}`); per-category id lists live under
//! `category_index:{category}` and `store_category_index:{category}`.
//! The index is a derived, best-effort view: an id whose record is missing
//! is skipped on read, never treated as corruption.

use crate::core::broker::KvBroker;
use crate::core::db;
use crate::core::error::StockpingError;
use crate::core::kv;
use crate::core::schemas;
use crate::core::time::now_epoch_z;
use crate::core::workspace::Workspace;
use crate::fixtures;
use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpecKind {
    Text,
    Select,
    Color,
}

/// A named attribute a requester may fill in when inquiring about a product.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpecField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: SpecKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl SpecField {
    /// Select and color fields must carry a non-empty option list; text
    /// fields must carry none.
    pub fn validate(&self) -> Result<(), StockpingError> {
        let ok = match self.kind {
            SpecKind::Text => self.options.is_none(),
            SpecKind::Select | SpecKind::Color => {
                self.options.as_ref().is_some_and(|o| !o.is_empty())
            }
        };
        if ok {
            Ok(())
        } else {
            Err(StockpingError::InvalidArgument(format!(
                "spec field '{}' has an option list inconsistent with its kind",
                self.key
            )))
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub specs: Vec<SpecField>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    /// Display string shown to the requester. Never computed.
    pub distance: String,
    pub phone: String,
}

/// Seeds the fixture catalog if the sentinel key is absent.
///
/// Safe to invoke on every process start: the whole check-then-write pass
/// runs under the broker lock, and the sentinel itself is written with
/// `set_if_absent`, so concurrent startups write the fixtures exactly once.
/// Returns true when this call performed the seed.
pub fn seed_if_empty(ws: &Workspace) -> Result<bool, StockpingError> {
    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);

    broker.with_conn(&db_path, "stockping", "catalog.seed", |conn| {
        kv::ensure_schema(conn)?;
        if kv::get(conn, schemas::SEED_SENTINEL_KEY)?.is_some() {
            return Ok(false);
        }

        let products = fixtures::products();
        let mut category_index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for product in &products {
            for spec in &product.specs {
                spec.validate()?;
            }
            kv::set(
                conn,
                &schemas::product_key(&product.id),
                &serde_json::to_string(product).unwrap(),
            )?;
            category_index
                .entry(product.category.clone())
                .or_default()
                .push(product.id.clone());
        }
        for (category, ids) in &category_index {
            kv::set(
                conn,
                &schemas::category_index_key(category),
                &serde_json::to_string(ids).unwrap(),
            )?;
        }

        let stores = fixtures::stores();
        let mut store_index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for store in &stores {
            kv::set(
                conn,
                &schemas::store_key(&store.id),
                &serde_json::to_string(store).unwrap(),
            )?;
            store_index
                .entry(store.category.clone())
                .or_default()
                .push(store.id.clone());
        }
        for (category, ids) in &store_index {
            kv::set(
                conn,
                &schemas::store_category_index_key(category),
                &serde_json::to_string(ids).unwrap(),
            )?;
        }

        kv::set_if_absent(conn, schemas::SEED_SENTINEL_KEY, "true")?;
        Ok(true)
    })
}

fn read_index(conn: &Connection, index_key: &str) -> Result<Vec<String>, StockpingError> {
    match kv::get(conn, index_key)? {
        Some(json) => Ok(serde_json::from_str(&json).unwrap_or_default()),
        None => Ok(Vec::new()),
    }
}

/// Products in a category, in seed order. Unknown category is an empty
/// list, and an index entry whose record has gone missing is skipped.
pub fn products_in_category(
    ws: &Workspace,
    category: &str,
) -> Result<Vec<Product>, StockpingError> {
    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);

    broker.with_conn(&db_path, "stockping", "catalog.products", |conn| {
        kv::ensure_schema(conn)?;
        let ids = read_index(conn, &schemas::category_index_key(category))?;
        let mut products = Vec::new();
        for id in ids {
            if let Some(json) = kv::get(conn, &schemas::product_key(&id))? {
                if let Ok(product) = serde_json::from_str::<Product>(&json) {
                    products.push(product);
                }
            }
        }
        Ok(products)
    })
}

/// Stores in a category, in seed order. Same tolerance as products.
pub fn stores_in_category(ws: &Workspace, category: &str) -> Result<Vec<Store>, StockpingError> {
    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);

    broker.with_conn(&db_path, "stockping", "catalog.stores", |conn| {
        kv::ensure_schema(conn)?;
        let ids = read_index(conn, &schemas::store_category_index_key(category))?;
        let mut stores = Vec::new();
        for id in ids {
            if let Some(json) = kv::get(conn, &schemas::store_key(&id))? {
                if let Ok(store) = serde_json::from_str::<Store>(&json) {
                    stores.push(store);
                }
            }
        }
        Ok(stores)
    })
}

/// Primary-entity read: no skip-tolerance, storage errors surface.
pub fn get_store(ws: &Workspace, id: &str) -> Result<Option<Store>, StockpingError> {
    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);

    broker.with_conn(&db_path, "stockping", "catalog.get_store", |conn| {
        kv::ensure_schema(conn)?;
        match kv::get(conn, &schemas::store_key(id))? {
            Some(json) => {
                let store = serde_json::from_str(&json).map_err(|e| {
                    StockpingError::InvalidArgument(format!("corrupt store record '{}': {}", id, e))
                })?;
                Ok(Some(store))
            }
            None => Ok(None),
        }
    })
}

#[derive(Parser, Debug)]
#[clap(name = "catalog", about = "Query the seeded product and store catalog.")]
pub struct CatalogCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: CatalogCommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List products in a category.
    Products {
        #[clap(long)]
        category: String,
    },
    /// List stores carrying a category.
    Stores {
        #[clap(long)]
        category: String,
    },
}

pub fn run_catalog_cli(ws: &Workspace, cli: CatalogCli) -> Result<(), StockpingError> {
    let out = match &cli.command {
        CatalogCommand::Products { category } => {
            let products = products_in_category(ws, category)?;
            serde_json::json!({
                "ts": now_epoch_z(),
                "cmd": "catalog.products",
                "status": "ok",
                "category": category,
                "products": products,
            })
        }
        CatalogCommand::Stores { category } => {
            let stores = stores_in_category(ws, category)?;
            serde_json::json!({
                "ts": now_epoch_z(),
                "cmd": "catalog.stores",
                "status": "ok",
                "category": category,
                "stores": stores,
            })
        }
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&out).unwrap());
        }
        OutputFormat::Text => match &cli.command {
            CatalogCommand::Products { category } => {
                let items = out.get("products").and_then(|v| v.as_array());
                match items {
                    Some(arr) if !arr.is_empty() => {
                        println!("Products in '{}':", category);
                        for v in arr {
                            let id = v.get("id").and_then(|x| x.as_str()).unwrap_or("?");
                            let name = v.get("name").and_then(|x| x.as_str()).unwrap_or("");
                            let nspecs =
                                v.get("specs").and_then(|x| x.as_array()).map_or(0, |a| a.len());
                            println!("- {} {} ({} spec fields)", id, name, nspecs);
                        }
                    }
                    _ => println!("No products in '{}'.", category),
                }
            }
            CatalogCommand::Stores { category } => {
                let items = out.get("stores").and_then(|v| v.as_array());
                match items {
                    Some(arr) if !arr.is_empty() => {
                        println!("Stores for '{}':", category);
                        for v in arr {
                            let id = v.get("id").and_then(|x| x.as_str()).unwrap_or("?");
                            let name = v.get("name").and_then(|x| x.as_str()).unwrap_or("");
                            let distance =
                                v.get("distance").and_then(|x| x.as_str()).unwrap_or("?");
                            let phone = v.get("phone").and_then(|x| x.as_str()).unwrap_or("?");
                            println!("- {} {} [{} | {}]", id, name, distance, phone);
                        }
                    }
                    _ => println!("No stores for '{}'.", category),
                }
            }
        },
    }
    Ok(())
}
