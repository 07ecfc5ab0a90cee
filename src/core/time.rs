//! Timestamp and identifier helpers.

use ulid::Ulid;

/// Returns unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
pub fn now_epoch_z() -> String {
    format!("{}Z", now_unix_secs())
}

pub fn parse_epoch_z(ts: &str) -> Option<u64> {
    ts.trim_end_matches('Z').parse::<u64>().ok()
}

pub fn now_unix_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Request ids must stay unique under concurrent creation: a ULID is
/// millisecond-ordered with an 80-bit random suffix, so two processes
/// creating in the same instant still diverge.
pub fn new_request_id() -> String {
    format!("req_{}", Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_epoch_z_format() {
        let result = now_epoch_z();
        assert!(result.ends_with('Z'));
        let numeric_part = result.trim_end_matches('Z');
        assert!(numeric_part.parse::<u64>().is_ok());
    }

    #[test]
    fn test_parse_epoch_z_round_trips() {
        let ts = now_epoch_z();
        let parsed = parse_epoch_z(&ts).expect("parse");
        assert!(parsed <= now_unix_secs());
        assert!(parse_epoch_z("garbage").is_none());
    }

    #[test]
    fn test_request_ids_are_unique_and_prefixed() {
        let id1 = new_request_id();
        let id2 = new_request_id();
        assert_ne!(id1, id2);
        assert!(id1.starts_with("req_"));
        assert!(Ulid::from_string(id1.trim_start_matches("req_")).is_ok());
    }
}
