//! Product search within a category.
//!
//! Case-insensitive substring match against the product name, preserving
//! the category index's seed order. No fuzzy matching, no ranking.

use crate::catalog::{self, Product};
use crate::core::error::StockpingError;
use crate::core::time::now_epoch_z;
use crate::core::workspace::Workspace;
use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// An empty query matches every product in the category (substring
/// semantics). Unknown categories yield an empty list, not an error. Short
/// queries are never rejected here; any minimum length is a UI concern.
pub fn search(ws: &Workspace, category: &str, query: &str) -> Result<Vec<Product>, StockpingError> {
    let needle = query.to_lowercase();
    let products = catalog::products_in_category(ws, category)?;
    Ok(products
        .into_iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect())
}

#[derive(Parser, Debug)]
#[clap(name = "search", about = "Search products by name within a category.")]
pub struct SearchCli {
    #[clap(long)]
    category: String,
    #[clap(long)]
    query: String,
    /// Output format.
    #[clap(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub fn run_search_cli(ws: &Workspace, cli: SearchCli) -> Result<(), StockpingError> {
    let products = search(ws, &cli.category, &cli.query)?;

    match cli.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "ts": now_epoch_z(),
                "cmd": "search.products",
                "status": "ok",
                "category": cli.category,
                "query": cli.query,
                "products": products,
            });
            println!("{}", serde_json::to_string_pretty(&out).unwrap());
        }
        OutputFormat::Text => {
            if products.is_empty() {
                println!("No products matching '{}' in '{}'.", cli.query, cli.category);
            } else {
                println!("Matches for '{}' in '{}':", cli.query, cli.category);
                for p in &products {
                    println!("- {} {}", p.id, p.name);
                }
            }
        }
    }
    Ok(())
}
