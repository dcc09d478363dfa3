//! Database schema definitions for the floor database.
//!
//! One SQLite file holds restaurants, their tables, and the waiters serving them. A table
//! carries at most one waiter through `waiter_id`.

pub const FLOOR_DB_NAME: &str = "floor.db";

pub const FLOOR_DB_SCHEMA_RESTAURANTS: &str = "
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
";

pub const FLOOR_DB_SCHEMA_WAITERS: &str = "
    CREATE TABLE IF NOT EXISTS waiters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
";

pub const FLOOR_DB_SCHEMA_TABLES: &str = "
    CREATE TABLE IF NOT EXISTS tables (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number TEXT NOT NULL,
        restaurant_id INTEGER NOT NULL,
        waiter_id INTEGER,
        UNIQUE(number, restaurant_id),
        FOREIGN KEY(restaurant_id) REFERENCES restaurants(id),
        FOREIGN KEY(waiter_id) REFERENCES waiters(id)
    )
";

pub const FLOOR_DB_SCHEMA_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tables_waiter ON tables(waiter_id)";

/// Statements applied in order by `db::initialize_floor_db`.
pub const FLOOR_DB_SCHEMA: &[&str] = &[
    FLOOR_DB_SCHEMA_RESTAURANTS,
    FLOOR_DB_SCHEMA_WAITERS,
    FLOOR_DB_SCHEMA_TABLES,
    FLOOR_DB_SCHEMA_INDEX,
];
