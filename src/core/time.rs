//! Timestamps, event ids, and the JSON response envelope shared by CLI output.

use serde_json::Value as JsonValue;
use ulid::Ulid;

pub const ENVELOPE_VERSION: &str = "1.0.0";

/// Unix-epoch seconds with a `Z` suffix, e.g. `1771220592Z`.
pub fn now_epoch_z() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}

pub fn new_event_id() -> String {
    Ulid::new().to_string()
}

/// Wrap a command result for `--format json`. The payload lands under `data`.
pub fn command_envelope(cmd: &str, status: &str, data: JsonValue) -> JsonValue {
    serde_json::json!({
        "envelope_version": ENVELOPE_VERSION,
        "ts": now_epoch_z(),
        "event_id": new_event_id(),
        "cmd": cmd,
        "status": status,
        "data": data,
    })
}
