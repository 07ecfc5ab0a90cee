use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use stockping::catalog;
use stockping::core::broker::KvBroker;
use stockping::core::db;
use stockping::core::error::StockpingError;
use stockping::core::kv;
use stockping::core::schemas;
use stockping::core::time::now_unix_secs;
use stockping::core::workspace::Workspace;
use stockping::request::{self, Request, RequestStatus, ResolveConfig};
use tempfile::tempdir;

fn seeded_workspace() -> (tempfile::TempDir, Workspace) {
    let tmp = tempdir().expect("tempdir");
    let ws = Workspace::at(tmp.path().to_path_buf());
    catalog::seed_if_empty(&ws).expect("seed");
    (tmp, ws)
}

fn rice_cooker_specs() -> BTreeMap<String, String> {
    let mut specs = BTreeMap::new();
    specs.insert("capacity".to_string(), "1.8L".to_string());
    specs
}

/// Rewrites a stored request's created_at so its reply window has elapsed.
fn backdate(ws: &Workspace, request_id: &str, secs: u64) {
    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);
    broker
        .with_conn(&db_path, "test", "backdate", |conn| {
            let key = schemas::request_key(request_id);
            let mut record: Request =
                serde_json::from_str(&kv::get(conn, &key)?.expect("request record")).unwrap();
            record.created_at = format!("{}Z", now_unix_secs() - secs);
            kv::set(conn, &key, &serde_json::to_string(&record).unwrap())
        })
        .expect("backdate");
}

#[test]
fn create_returns_pending_request_with_composed_message() {
    let (_tmp, ws) = seeded_workspace();

    let req = request::create(&ws, "store_001", "Rice Cooker", rice_cooker_specs(), "Downtown")
        .expect("create");

    assert_eq!(req.status, RequestStatus::Pending);
    assert!(req.id.starts_with("req_"));
    assert_eq!(req.store_id, "store_001");
    assert_eq!(req.store_name, "Kitchen World");
    assert_eq!(req.store_phone, "+91 98765 43210");
    assert!(!req.message.is_empty());
    assert!(req.message.contains("1.8L"));
    assert!(req.message.contains("Downtown"));
    assert!(req.updated_at.is_none());

    // Persisted record round-trips everything create returned.
    let stored = request::get_request(&ws, &req.id)
        .expect("get_request")
        .expect("stored");
    assert_eq!(stored.message, req.message);
    assert_eq!(stored.created_at, req.created_at);
    assert_eq!(stored.specs.get("capacity").map(String::as_str), Some("1.8L"));
}

#[test]
fn create_snapshot_is_denormalized() {
    let (_tmp, ws) = seeded_workspace();
    let req = request::create(&ws, "store_001", "Rice Cooker", rice_cooker_specs(), "Downtown")
        .expect("create");

    // Mutate the store record after creation; the request must not change.
    let broker = KvBroker::new(&ws.root);
    let db_path = db::catalog_db_path(&ws.root);
    broker
        .with_conn(&db_path, "test", "edit_store", |conn| {
            let key = schemas::store_key("store_001");
            let mut store: catalog::Store =
                serde_json::from_str(&kv::get(conn, &key)?.expect("store")).unwrap();
            store.phone = "+91 00000 00000".to_string();
            kv::set(conn, &key, &serde_json::to_string(&store).unwrap())
        })
        .expect("edit store");

    let stored = request::get_request(&ws, &req.id)
        .expect("get_request")
        .expect("stored");
    assert_eq!(stored.store_phone, "+91 98765 43210");
}

#[test]
fn create_rejects_unknown_store_and_empty_fields() {
    let (_tmp, ws) = seeded_workspace();

    let err = request::create(&ws, "store_999", "Rice Cooker", BTreeMap::new(), "Downtown")
        .expect_err("unknown store");
    assert!(matches!(err, StockpingError::NotFound(_)));

    let err = request::create(&ws, "store_001", "", BTreeMap::new(), "Downtown")
        .expect_err("empty product name");
    assert!(matches!(err, StockpingError::InvalidArgument(_)));

    let err = request::create(&ws, "store_001", "Rice Cooker", BTreeMap::new(), "  ")
        .expect_err("empty location");
    assert!(matches!(err, StockpingError::InvalidArgument(_)));
}

#[test]
fn fresh_request_polls_pending_without_mutation() {
    let (_tmp, ws) = seeded_workspace();
    let req = request::create(&ws, "store_001", "Rice Cooker", rice_cooker_specs(), "Downtown")
        .expect("create");

    let cfg = ResolveConfig::default();
    let mut rng = StdRng::seed_from_u64(1);
    let status = request::get_status(&ws, &req.id, &cfg, &mut rng).expect("status");
    assert_eq!(status, RequestStatus::Pending);

    let stored = request::get_request(&ws, &req.id)
        .expect("get_request")
        .expect("stored");
    assert_eq!(stored.status, RequestStatus::Pending);
    assert!(stored.updated_at.is_none());
}

#[test]
fn elapsed_request_transitions_exactly_once() {
    let (_tmp, ws) = seeded_workspace();
    let req = request::create(&ws, "store_001", "Rice Cooker", rice_cooker_specs(), "Downtown")
        .expect("create");
    backdate(&ws, &req.id, 60);

    let cfg = ResolveConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    let decided = request::get_status(&ws, &req.id, &cfg, &mut rng).expect("status");
    assert!(decided != RequestStatus::Pending);

    // Later polls, with different random streams, must observe the same
    // already-decided state and never re-roll.
    for seed in 0..10 {
        let mut other_rng = StdRng::seed_from_u64(seed);
        let again = request::get_status(&ws, &req.id, &cfg, &mut other_rng).expect("status");
        assert_eq!(again, decided);
    }

    let stored = request::get_request(&ws, &req.id)
        .expect("get_request")
        .expect("stored");
    assert_eq!(stored.status, decided);
    assert!(stored.updated_at.is_some());
}

#[test]
fn longer_window_keeps_request_pending() {
    let (_tmp, ws) = seeded_workspace();
    let req = request::create(&ws, "store_001", "Rice Cooker", rice_cooker_specs(), "Downtown")
        .expect("create");
    backdate(&ws, &req.id, 60);

    let cfg = ResolveConfig {
        reply_after_secs: 3600,
    };
    let mut rng = StdRng::seed_from_u64(7);
    let status = request::get_status(&ws, &req.id, &cfg, &mut rng).expect("status");
    assert_eq!(status, RequestStatus::Pending);
}

#[test]
fn external_update_overrides_regardless_of_elapsed_time() {
    let (_tmp, ws) = seeded_workspace();
    let req = request::create(&ws, "store_001", "Rice Cooker", rice_cooker_specs(), "Downtown")
        .expect("create");

    request::update_status(&ws, &req.id, RequestStatus::Available).expect("update");

    let cfg = ResolveConfig::default();
    let mut rng = StdRng::seed_from_u64(3);
    let status = request::get_status(&ws, &req.id, &cfg, &mut rng).expect("status");
    assert_eq!(status, RequestStatus::Available);

    // Last write wins, even over a terminal state.
    request::update_status(&ws, &req.id, RequestStatus::Similar).expect("re-update");
    let status = request::get_status(&ws, &req.id, &cfg, &mut rng).expect("status");
    assert_eq!(status, RequestStatus::Similar);
}

#[test]
fn update_rejects_pending_as_reply() {
    let (_tmp, ws) = seeded_workspace();
    let req = request::create(&ws, "store_001", "Rice Cooker", rice_cooker_specs(), "Downtown")
        .expect("create");

    let err = request::update_status(&ws, &req.id, RequestStatus::Pending)
        .expect_err("pending is not a reply");
    assert!(matches!(err, StockpingError::InvalidArgument(_)));
}

#[test]
fn unknown_request_id_is_not_found() {
    let (_tmp, ws) = seeded_workspace();

    let cfg = ResolveConfig::default();
    let mut rng = StdRng::seed_from_u64(1);
    let err = request::get_status(&ws, "req_nonexistent", &cfg, &mut rng)
        .expect_err("unknown request");
    assert!(matches!(err, StockpingError::NotFound(_)));

    let err = request::update_status(&ws, "req_nonexistent", RequestStatus::Available)
        .expect_err("unknown request");
    assert!(matches!(err, StockpingError::NotFound(_)));

    assert!(request::get_request(&ws, "req_nonexistent")
        .expect("get_request")
        .is_none());
}

#[test]
fn concurrent_request_ids_do_not_collide() {
    let (_tmp, ws) = seeded_workspace();
    let mut ids = std::collections::HashSet::new();
    for _ in 0..20 {
        let req =
            request::create(&ws, "store_001", "Rice Cooker", rice_cooker_specs(), "Downtown")
                .expect("create");
        assert!(ids.insert(req.id));
    }
}
