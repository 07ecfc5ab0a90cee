//! Inquiry request lifecycle.
//!
//! A request is one customer-to-store availability question. It is created
//! with a composed outbound message and a denormalized snapshot of the
//! store's name and phone, polled for status, and may be answered either by
//! the simulated store reply (a uniformly-random terminal state once the
//! reply window elapses) or by an external operator via `update_status`.
//!
//! ```text
//! pending -> { available, not_available, similar }   (terminal)
//! ```
//!
//! The simulated reply is computed lazily inside the poll path rather than
//! by a background timer: on read, compare elapsed time against the
//! configured window and, if due and still pending, commit the transition
//! with a compare-and-set so only one concurrent poller decides the outcome.

use crate::catalog;
use crate::core::broker::KvBroker;
use crate::core::db;
use crate::core::error::StockpingError;
use crate::core::kv;
use crate::core::schemas;
use crate::core::time::{new_request_id, now_epoch_z, now_unix_secs, parse_epoch_z};
use crate::core::workspace::Workspace;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Available,
    NotAvailable,
    Similar,
}

/// The three states a store reply can land in, in the order of the numbered
/// options in the composed message.
pub const TERMINAL_STATES: [RequestStatus; 3] = [
    RequestStatus::Available,
    RequestStatus::NotAvailable,
    RequestStatus::Similar,
];

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Available => "available",
            RequestStatus::NotAvailable => "not_available",
            RequestStatus::Similar => "similar",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl FromStr for RequestStatus {
    type Err = StockpingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "available" => Ok(RequestStatus::Available),
            "not_available" => Ok(RequestStatus::NotAvailable),
            "similar" => Ok(RequestStatus::Similar),
            other => Err(StockpingError::InvalidArgument(format!(
                "unknown request status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Request {
    pub id: String,
    pub store_id: String,
    /// Snapshot of the store at creation time. Later store edits must not
    /// retroactively change a historical request.
    pub store_name: String,
    pub store_phone: String,
    pub product_name: String,
    /// Filled-in spec values; free text rides under the `notes` key.
    pub specs: BTreeMap<String, String>,
    pub customer_location: String,
    /// Composed once at creation, immutable. The external channel sends
    /// this text; the engine only persists it.
    pub message: String,
    pub status: RequestStatus,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// How the simulated store reply behaves. The window is configuration, not
/// an embedded constant; `STOCKPING_REPLY_AFTER_SECS` overrides it.
#[derive(Debug, Clone, Copy)]
pub struct ResolveConfig {
    pub reply_after_secs: u64,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            reply_after_secs: 10,
        }
    }
}

impl ResolveConfig {
    pub fn from_env() -> Self {
        let reply_after_secs = std::env::var("STOCKPING_REPLY_AFTER_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(Self::default().reply_after_secs);
        Self { reply_after_secs }
    }
}

/// Composes the outbound inquiry text. Deterministic: spec fields render in
/// stable key order (underscores shown as spaces), then the customer
/// location, then the fixed three-option reply footer.
pub fn compose_message(
    product_name: &str,
    specs: &BTreeMap<String, String>,
    customer_location: &str,
) -> String {
    let specs_text = specs
        .iter()
        .map(|(key, value)| format!("{}: {}", key.replace('_', " "), value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Product Inquiry\n\n\
         Product: {}\n\
         {}\n\n\
         Customer Location: {}\n\n\
         Please reply:\n\
         1 - Available\n\
         2 - Not Available\n\
         3 - Similar Option",
        product_name, specs_text, customer_location
    )
}

/// Creates a request against a store and persists it as pending.
///
/// At-most-once best-effort: a retry after a partial failure may produce a
/// second request with a fresh id.
pub fn create(
    ws: &Workspace,
    store_id: &str,
    product_name: &str,
    specs: BTreeMap<String, String>,
    customer_location: &str,
) -> Result<Request, StockpingError> {
    if product_name.trim().is_empty() {
        return Err(StockpingError::InvalidArgument(
            "product name must not be empty".to_string(),
        ));
    }
    if customer_location.trim().is_empty() {
        return Err(StockpingError::InvalidArgument(
            "customer location must not be empty".to_string(),
        ));
    }

    let store = catalog::get_store(ws, store_id)?
        .ok_or_else(|| StockpingError::NotFound(format!("store '{}'", store_id)))?;

    let request = Request {
        id: new_request_id(),
        store_id: store.id.clone(),
        store_name: store.name.clone(),
        store_phone: store.phone.clone(),
        product_name: product_name.to_string(),
        message: compose_message(product_name, &specs, customer_location),
        specs,
        customer_location: customer_location.to_string(),
        status: RequestStatus::Pending,
        created_at: now_epoch_z(),
        updated_at: None,
    };

    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);
    broker.with_conn(&db_path, "stockping", "request.create", |conn| {
        kv::ensure_schema(conn)?;
        kv::set(
            conn,
            &schemas::request_key(&request.id),
            &serde_json::to_string(&request).unwrap(),
        )?;
        Ok(())
    })?;

    Ok(request)
}

/// Polls a request's status.
///
/// Load-bearing side effect: a pending request whose reply window has
/// elapsed transitions here, once, to a uniformly-random terminal state.
/// The read-decide-persist sequence runs under the broker lock and the
/// persist is a compare-and-set against the record as read, so two
/// overlapping polls cannot commit divergent outcomes; the loser re-reads
/// the decided state.
pub fn get_status<R: Rng>(
    ws: &Workspace,
    request_id: &str,
    cfg: &ResolveConfig,
    rng: &mut R,
) -> Result<RequestStatus, StockpingError> {
    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);

    broker.with_conn(&db_path, "stockping", "request.status", |conn| {
        kv::ensure_schema(conn)?;
        let key = schemas::request_key(request_id);
        let stored = kv::get(conn, &key)?
            .ok_or_else(|| StockpingError::NotFound(format!("request '{}'", request_id)))?;
        let mut request: Request = serde_json::from_str(&stored).map_err(|e| {
            StockpingError::InvalidArgument(format!(
                "corrupt request record '{}': {}",
                request_id, e
            ))
        })?;

        if request.status != RequestStatus::Pending {
            return Ok(request.status);
        }

        let created = parse_epoch_z(&request.created_at).unwrap_or(u64::MAX);
        let elapsed = now_unix_secs().saturating_sub(created);
        if elapsed <= cfg.reply_after_secs {
            return Ok(RequestStatus::Pending);
        }

        request.status = TERMINAL_STATES[rng.gen_range(0..TERMINAL_STATES.len())];
        request.updated_at = Some(now_epoch_z());
        let swapped = kv::compare_and_set(
            conn,
            &key,
            &stored,
            &serde_json::to_string(&request).unwrap(),
        )?;
        if swapped {
            return Ok(request.status);
        }

        // Another poller decided first; report what it committed.
        let decided = kv::get(conn, &key)?
            .ok_or_else(|| StockpingError::NotFound(format!("request '{}'", request_id)))?;
        let decided: Request = serde_json::from_str(&decided).map_err(|e| {
            StockpingError::InvalidArgument(format!(
                "corrupt request record '{}': {}",
                request_id, e
            ))
        })?;
        Ok(decided.status)
    })
}

/// Records a real store reply, overriding the simulated one.
///
/// Only the three terminal states are accepted; re-entering pending is
/// rejected. Terminal-to-terminal overwrite is allowed, last write wins.
pub fn update_status(
    ws: &Workspace,
    request_id: &str,
    new_status: RequestStatus,
) -> Result<(), StockpingError> {
    if !new_status.is_terminal() {
        return Err(StockpingError::InvalidArgument(format!(
            "status '{}' is not a valid store reply",
            new_status
        )));
    }

    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);

    broker.with_conn(&db_path, "stockping", "request.update", |conn| {
        kv::ensure_schema(conn)?;
        let key = schemas::request_key(request_id);
        let stored = kv::get(conn, &key)?
            .ok_or_else(|| StockpingError::NotFound(format!("request '{}'", request_id)))?;
        let mut request: Request = serde_json::from_str(&stored).map_err(|e| {
            StockpingError::InvalidArgument(format!(
                "corrupt request record '{}': {}",
                request_id, e
            ))
        })?;

        request.status = new_status;
        request.updated_at = Some(now_epoch_z());
        kv::set(conn, &key, &serde_json::to_string(&request).unwrap())?;
        Ok(())
    })
}

/// Full-record read for operators. Requests are never deleted, so this is
/// the audit surface.
pub fn get_request(ws: &Workspace, request_id: &str) -> Result<Option<Request>, StockpingError> {
    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);

    broker.with_conn(&db_path, "stockping", "request.get", |conn| {
        kv::ensure_schema(conn)?;
        match kv::get(conn, &schemas::request_key(request_id))? {
            Some(json) => {
                let request = serde_json::from_str(&json).map_err(|e| {
                    StockpingError::InvalidArgument(format!(
                        "corrupt request record '{}': {}",
                        request_id, e
                    ))
                })?;
                Ok(Some(request))
            }
            None => Ok(None),
        }
    })
}

fn parse_spec_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>, StockpingError> {
    let mut specs = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            StockpingError::InvalidArgument(format!("spec '{}' is not key=value", pair))
        })?;
        specs.insert(key.to_string(), value.to_string());
    }
    Ok(specs)
}

fn colorize_status(status: &str) -> String {
    match status {
        "pending" => status.yellow().to_string(),
        "available" => status.green().to_string(),
        "not_available" => status.red().to_string(),
        "similar" => status.cyan().to_string(),
        other => other.to_string(),
    }
}

#[derive(Parser, Debug)]
#[clap(name = "request", about = "Create and track availability inquiries.")]
pub struct RequestCli {
    /// Output format for this command group.
    #[clap(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
    #[clap(subcommand)]
    command: RequestCommand,
}

#[derive(Subcommand, Debug)]
pub enum RequestCommand {
    /// Create an inquiry against a store.
    Create {
        #[clap(long)]
        store_id: String,
        #[clap(long)]
        product_name: String,
        /// Spec value, repeatable, as key=value (e.g. --spec capacity=1.8L).
        #[clap(long = "spec")]
        specs: Vec<String>,
        /// Optional free-text notes for the store.
        #[clap(long)]
        notes: Option<String>,
        #[clap(long)]
        location: String,
    },
    /// Poll a request's status (may trigger the simulated store reply).
    Status {
        #[clap(long)]
        id: String,
    },
    /// Record a real store reply: available, not_available, or similar.
    Update {
        #[clap(long)]
        id: String,
        #[clap(long)]
        status: String,
    },
    /// Show the full stored request record.
    Get {
        #[clap(long)]
        id: String,
    },
}

pub fn run_request_cli(ws: &Workspace, cli: RequestCli) -> Result<(), StockpingError> {
    let out = match &cli.command {
        RequestCommand::Create {
            store_id,
            product_name,
            specs,
            notes,
            location,
        } => {
            let mut specs = parse_spec_pairs(specs)?;
            if let Some(notes) = notes {
                if !notes.trim().is_empty() {
                    specs.insert("notes".to_string(), notes.clone());
                }
            }
            let request = create(ws, store_id, product_name, specs, location)?;
            serde_json::json!({
                "ts": now_epoch_z(),
                "cmd": "request.create",
                "status": "ok",
                "request": request,
            })
        }
        RequestCommand::Status { id } => {
            let status = get_status(ws, id, &ResolveConfig::from_env(), &mut rand::thread_rng())?;
            serde_json::json!({
                "ts": now_epoch_z(),
                "cmd": "request.status",
                "status": "ok",
                "id": id,
                "request_status": status,
            })
        }
        RequestCommand::Update { id, status } => {
            let parsed = RequestStatus::from_str(status)?;
            update_status(ws, id, parsed)?;
            serde_json::json!({
                "ts": now_epoch_z(),
                "cmd": "request.update",
                "status": "ok",
                "id": id,
                "request_status": parsed,
            })
        }
        RequestCommand::Get { id } => {
            let request = get_request(ws, id)?;
            serde_json::json!({
                "ts": now_epoch_z(),
                "cmd": "request.get",
                "status": if request.is_some() { "ok" } else { "not_found" },
                "id": id,
                "request": request,
            })
        }
    };

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&out).unwrap());
        }
        OutputFormat::Text => match &cli.command {
            RequestCommand::Create { .. } => {
                let request = out.get("request").cloned().unwrap_or_default();
                let id = request.get("id").and_then(|x| x.as_str()).unwrap_or("?");
                let store = request
                    .get("store_name")
                    .and_then(|x| x.as_str())
                    .unwrap_or("?");
                let phone = request
                    .get("store_phone")
                    .and_then(|x| x.as_str())
                    .unwrap_or("?");
                let message = request
                    .get("message")
                    .and_then(|x| x.as_str())
                    .unwrap_or("");
                println!("Request {} created for {} ({})", id, store, phone);
                println!();
                println!("{}", message);
            }
            RequestCommand::Status { .. } | RequestCommand::Update { .. } => {
                let id = out.get("id").and_then(|x| x.as_str()).unwrap_or("?");
                let status = out
                    .get("request_status")
                    .and_then(|x| x.as_str())
                    .unwrap_or("?");
                println!("{}: {}", id, colorize_status(status));
            }
            RequestCommand::Get { .. } => match out.get("request") {
                Some(request) if !request.is_null() => {
                    println!("{}", serde_json::to_string_pretty(request).unwrap());
                }
                _ => println!("Request not found."),
            },
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_deterministic_and_complete() {
        let mut specs = BTreeMap::new();
        specs.insert("capacity".to_string(), "1.8L".to_string());
        specs.insert("brand".to_string(), "Any".to_string());

        let first = compose_message("Rice Cooker", &specs, "Downtown");
        let second = compose_message("Rice Cooker", &specs, "Downtown");
        assert_eq!(first, second);

        assert!(first.starts_with("Product Inquiry"));
        assert!(first.contains("Product: Rice Cooker"));
        assert!(first.contains("capacity: 1.8L"));
        assert!(first.contains("Customer Location: Downtown"));
        assert!(first.contains("1 - Available"));
        assert!(first.contains("2 - Not Available"));
        assert!(first.contains("3 - Similar Option"));
        // brand sorts before capacity: stable key order.
        assert!(first.find("brand: Any").unwrap() < first.find("capacity: 1.8L").unwrap());
    }

    #[test]
    fn underscored_spec_keys_render_with_spaces() {
        let mut specs = BTreeMap::new();
        specs.insert("output_power".to_string(), "33W".to_string());
        let message = compose_message("Mobile Charger", &specs, "Central");
        assert!(message.contains("output power: 33W"));
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Available,
            RequestStatus::NotAvailable,
            RequestStatus::Similar,
        ] {
            assert_eq!(RequestStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(RequestStatus::from_str("answered").is_err());
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!RequestStatus::Pending.is_terminal());
        for status in TERMINAL_STATES {
            assert!(status.is_terminal());
        }
    }

    #[test]
    fn spec_pairs_parse_or_reject() {
        let specs =
            parse_spec_pairs(&["capacity=1.8L".to_string(), "color=red".to_string()]).unwrap();
        assert_eq!(specs.get("capacity").map(String::as_str), Some("1.8L"));
        assert_eq!(specs.get("color").map(String::as_str), Some("red"));
        assert!(parse_spec_pairs(&["no-equals".to_string()]).is_err());
    }

    #[test]
    fn resolve_config_default_window() {
        assert_eq!(ResolveConfig::default().reply_after_secs, 10);
    }
}
