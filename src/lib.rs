//! stockping: a daemonless, local-first availability inquiry engine.
//!
//! A client locates products across categories, finds nearby stores carrying
//! them, and dispatches an availability inquiry to a store, then polls for
//! the store's answer. This crate is the backend data/state engine; the
//! presentation layer and the real outbound messaging channel are external
//! collaborators. The engine persists the composed message text and the
//! delivery target, and exposes a status an external operator may update.
//!
//! # Architecture
//!
//! ## One key-value store
//!
//! All state lives in a single sqlite-backed `kv` table of JSON records:
//! `product:{id}`, `store:{id}`, `category_index:{category}`,
//! `store_category_index:{category}`, `request:{id}`, and the seed sentinel
//! `products_initialized`.
//!
//! ## The thin waist
//!
//! Every read and write routes through [`core::broker::KvBroker`] for:
//! - Serialization (process-wide lock around each logical operation)
//! - Audit logging (`kv.events.jsonl`)
//!
//! ## Engines
//!
//! - [`catalog`]: seed-once fixture catalog with category indexes
//! - [`search`]: case-insensitive substring product search
//! - [`request`]: the inquiry lifecycle
//!   (`pending -> available | not_available | similar`), with the store
//!   reply simulated lazily on poll until a real channel reports one
//!
//! # Examples
//!
//! ```bash
//! stockping search --category home-kitchen --query rice
//! stockping catalog stores --category home-kitchen
//! stockping request create --store-id store_001 --product-name "Rice Cooker" \
//!     --spec capacity=1.8L --location Downtown
//! stockping request status --id req_01J...
//! stockping request update --id req_01J... --status available
//! ```

pub mod catalog;
pub mod core;
pub mod fixtures;
pub mod request;
pub mod search;

use crate::core::error::StockpingError;
use crate::core::workspace::Workspace;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "stockping",
    version = env!("CARGO_PKG_VERSION"),
    about = "Product availability inquiry engine"
)]
struct Cli {
    /// Workspace root (defaults to $STOCKPING_ROOT, then ~/.stockping/data).
    #[clap(long, global = true)]
    root: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize the workspace and seed the fixture catalog.
    Init,
    /// Query the product and store catalog.
    Catalog(catalog::CatalogCli),
    /// Search products by name within a category.
    Search(search::SearchCli),
    /// Create and track availability inquiries.
    Request(request::RequestCli),
    /// Print the version.
    Version,
}

pub fn run() -> Result<(), StockpingError> {
    let cli = Cli::parse();

    if let Command::Version = cli.command {
        println!("v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let ws = Workspace::resolve(cli.root)?;
    // Idempotent on every start; first caller wins under the broker lock.
    let seeded = catalog::seed_if_empty(&ws)?;

    match cli.command {
        Command::Init => {
            if seeded {
                println!("Seeded catalog fixtures at {}", ws.root.display());
            } else {
                println!("Catalog already initialized at {}", ws.root.display());
            }
            Ok(())
        }
        Command::Catalog(cmd) => catalog::run_catalog_cli(&ws, cmd),
        Command::Search(cmd) => search::run_search_cli(&ws, cmd),
        Command::Request(cmd) => request::run_request_cli(&ws, cmd),
        Command::Version => unreachable!(),
    }
}
