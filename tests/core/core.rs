use floorplan::core::broker::{self, DbBroker};
use floorplan::core::config::{self, FloorConfig};
use floorplan::core::db;
use floorplan::core::error::FloorError;
use floorplan::core::store::Store;
use std::fs;
use tempfile::tempdir;

#[test]
fn db_initializes_schema_with_pragmas() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();

    db::initialize_floor_db(root, "test").expect("floor init");
    let db_path = db::floor_db_path(root);
    assert!(db_path.exists());

    let conn = db::db_connect(&db_path.to_string_lossy()).expect("db connect");
    let fk_on: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .expect("pragma foreign_keys");
    assert_eq!(fk_on, 1);

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    let names: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    for expected in ["restaurants", "tables", "waiters"] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }

    // Re-running init is harmless.
    db::initialize_floor_db(root, "test").expect("second init");
}

#[test]
fn broker_records_success_and_error_events() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();
    db::initialize_floor_db(root, "auditor").unwrap();

    let broker = DbBroker::new(root, "auditor");
    let db_path = db::floor_db_path(root);
    broker
        .with_conn(&db_path, "check.ok", |conn| {
            conn.execute("INSERT INTO waiters(name) VALUES('A')", [])?;
            Ok(())
        })
        .unwrap();
    let err = broker
        .with_conn(&db_path, "check.fail", |_| -> Result<(), FloorError> {
            Err(FloorError::NotFound("nothing".to_string()))
        })
        .unwrap_err();
    assert!(matches!(err, FloorError::NotFound(_)));

    let events = broker::read_audit_log(root).unwrap();
    let tail: Vec<(&str, &str)> = events
        .iter()
        .rev()
        .take(2)
        .map(|e| (e.op.as_str(), e.status.as_str()))
        .collect();
    assert_eq!(tail, vec![("check.fail", "error"), ("check.ok", "success")]);
    assert!(events.iter().all(|e| e.actor == "auditor" && e.db_id == "floor.db"));
    assert!(events.iter().all(|e| ulid::Ulid::from_string(&e.event_id).is_ok()));
}

#[test]
fn committed_write_survives_unwritable_audit_log() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path();
    db::initialize_floor_db(root, "auditor").unwrap();
    fs::remove_file(broker::audit_log_path(root)).unwrap();
    fs::create_dir(broker::audit_log_path(root)).unwrap();

    let broker = DbBroker::new(root, "auditor");
    let db_path = db::floor_db_path(root);
    broker
        .with_conn(&db_path, "check.write", |conn| {
            conn.execute("INSERT INTO waiters(name) VALUES('A')", [])?;
            Ok(())
        })
        .expect("committed write stays a success");

    let err = broker
        .with_conn(&db_path, "check.fail", |_| -> Result<(), FloorError> {
            Err(FloorError::NotFound("nothing".to_string()))
        })
        .unwrap_err();
    assert!(matches!(err, FloorError::NotFound(_)));

    let conn = db::db_connect(&db_path.to_string_lossy()).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM waiters WHERE name = 'A'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn missing_audit_log_reads_empty() {
    let tmp = tempdir().unwrap();
    assert!(broker::read_audit_log(tmp.path()).unwrap().is_empty());
}

#[test]
fn store_lives_under_project_dir() {
    let tmp = tempdir().unwrap();
    let store = Store::for_project(tmp.path());
    assert_eq!(store.root, tmp.path().join(".floorplan").join("data"));
    assert_eq!(store.project_dir(), Some(tmp.path().join(".floorplan").as_path()));

    store.ensure().unwrap();
    assert!(store.root.is_dir());
}

#[test]
fn config_file_is_read_and_validated() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path();

    fs::write(config::config_path(dir), "capacity = 3\nactor = \"host\"\n").unwrap();
    let cfg = config::load_config(dir).unwrap();
    assert_eq!(
        cfg,
        FloorConfig {
            capacity: 3,
            actor: "host".to_string()
        }
    );

    fs::write(config::config_path(dir), "capacity = 0\n").unwrap();
    assert!(matches!(config::load_config(dir), Err(FloorError::ValidationError(_))));

    fs::write(config::config_path(dir), "capacity = \"many\"\n").unwrap();
    assert!(matches!(config::load_config(dir), Err(FloorError::ConfigError(_))));
}
