use crate::core::db;
use crate::core::error::FloorError;
use crate::core::time;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name of the append-only audit log inside the store root.
pub const AUDIT_LOG_NAME: &str = "floor.events.jsonl";

/// The DB Broker is the single entry point for database access.
/// It serializes connections in-process and records one audit event per operation.
pub struct DbBroker {
    audit_log_path: PathBuf,
    actor: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BrokerEvent {
    pub ts: String,
    pub event_id: String,
    pub actor: String,
    pub op: String,
    pub db_id: String,
    pub status: String,
}

impl DbBroker {
    pub fn new(root: &Path, actor: &str) -> Self {
        Self {
            audit_log_path: audit_log_path(root),
            actor: actor.to_string(),
        }
    }

    /// Execute a closure with a serialized connection to the specified DB.
    pub fn with_conn<F, R>(&self, db_path: &Path, op_name: &str, f: F) -> Result<R, FloorError>
    where
        F: FnOnce(&Connection) -> Result<R, FloorError>,
    {
        static DB_LOCK: Mutex<()> = Mutex::new(());
        let _lock = DB_LOCK
            .lock()
            .map_err(|_| FloorError::ValidationError("broker lock poisoned".to_string()))?;

        let db_id = db_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let conn = db::db_connect(&db_path.to_string_lossy())?;

        let result = f(&conn);

        let status = if result.is_ok() { "success" } else { "error" };
        // A lost audit line never fails an operation whose closure already committed.
        if let Err(e) = self.log_event(op_name, &db_id, status)
            && result.is_ok()
        {
            eprintln!("floorplan: audit log append failed for {}: {}", op_name, e);
        }

        result
    }

    fn log_event(&self, op: &str, db_id: &str, status: &str) -> Result<(), FloorError> {
        let ev = BrokerEvent {
            ts: time::now_epoch_z(),
            event_id: time::new_event_id(),
            actor: self.actor.clone(),
            op: op.to_string(),
            db_id: db_id.to_string(),
            status: status.to_string(),
        };

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.audit_log_path)?;

        writeln!(f, "{}", serde_json::to_string(&ev)?)?;
        Ok(())
    }
}

pub fn audit_log_path(root: &Path) -> PathBuf {
    root.join(AUDIT_LOG_NAME)
}

/// Read back every audit event, oldest first. A missing log reads as empty.
pub fn read_audit_log(root: &Path) -> Result<Vec<BrokerEvent>, FloorError> {
    let path = audit_log_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    let mut events = Vec::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        events.push(serde_json::from_str(line)?);
    }
    Ok(events)
}
