use crate::core::broker::DbBroker;
use crate::core::error;
use crate::core::schemas;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

pub fn db_connect(db_path: &str) -> Result<Connection, error::FloorError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
    conn.execute("PRAGMA foreign_keys=ON;", [])?;
    Ok(conn)
}

pub fn floor_db_path(root: &Path) -> PathBuf {
    root.join(schemas::FLOOR_DB_NAME)
}

pub fn initialize_floor_db(root: &Path, actor: &str) -> Result<(), error::FloorError> {
    let db_path = floor_db_path(root);
    let parent_dir = db_path.parent().ok_or_else(|| {
        error::FloorError::DatabaseInitializationError(format!(
            "no parent directory for {}",
            db_path.display()
        ))
    })?;
    fs::create_dir_all(parent_dir)?;

    let broker = DbBroker::new(root, actor);
    broker.with_conn(&db_path, "floor.init", |conn| {
        for stmt in schemas::FLOOR_DB_SCHEMA {
            conn.execute(stmt, [])?;
        }
        Ok(())
    })
}
