use crate::assignment::index::TableSet;
use crate::core::broker::DbBroker;
use crate::core::db;
use crate::core::error::FloorError;
use crate::core::model::{Restaurant, Table, Waiter};
use crate::core::store::Store;
use crate::repository::FloorRepository;
use rusqlite::{Connection, OptionalExtension, params};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How much demo data `seed` creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPlan {
    pub restaurants: usize,
    pub tables_per_restaurant: usize,
    pub waiters: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            restaurants: 2,
            tables_per_restaurant: 20,
            waiters: 8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub restaurants: usize,
    pub tables: usize,
    pub waiters: usize,
}

/// `FloorRepository` backed by `floor.db` in the store root.
pub struct SqliteRepository {
    broker: DbBroker,
    db_path: PathBuf,
}

impl SqliteRepository {
    /// Open the store's floor database, creating directory and schema when missing.
    pub fn open(store: &Store, actor: &str) -> Result<Self, FloorError> {
        store.ensure()?;
        db::initialize_floor_db(&store.root, actor)?;
        Ok(Self {
            broker: DbBroker::new(&store.root, actor),
            db_path: db::floor_db_path(&store.root),
        })
    }

    /// Create a table (and its restaurant) without assigning it.
    pub fn create_table(&self, table: &Table) -> Result<(), FloorError> {
        self.broker.with_conn(&self.db_path, "floor.create_table", |conn| {
            let tx = conn.unchecked_transaction()?;
            upsert_table(&tx, table)?;
            tx.commit()?;
            Ok(())
        })
    }

    pub fn create_waiter(&self, waiter: &Waiter) -> Result<(), FloorError> {
        self.broker.with_conn(&self.db_path, "floor.create_waiter", |conn| {
            upsert_waiter(conn, waiter)?;
            Ok(())
        })
    }

    /// Create `Restaurant1..N` with `Table1..M` each and `Waiter1..K`. Existing rows are kept.
    pub fn seed(&self, plan: &SeedPlan) -> Result<SeedReport, FloorError> {
        let mut tables = Vec::new();
        for r in 1..=plan.restaurants {
            let restaurant = Restaurant::new(&format!("Restaurant{}", r))?;
            for t in 1..=plan.tables_per_restaurant {
                tables.push(Table::new(&format!("Table{}", t), restaurant.clone())?);
            }
        }
        let waiters = (1..=plan.waiters)
            .map(|w| Waiter::new(&format!("Waiter{}", w)))
            .collect::<Result<Vec<_>, _>>()?;

        self.broker.with_conn(&self.db_path, "floor.seed", |conn| {
            let tx = conn.unchecked_transaction()?;
            for table in &tables {
                upsert_table(&tx, table)?;
            }
            for waiter in &waiters {
                upsert_waiter(&tx, waiter)?;
            }
            tx.commit()?;
            Ok(())
        })?;

        Ok(SeedReport {
            restaurants: plan.restaurants,
            tables: tables.len(),
            waiters: waiters.len(),
        })
    }
}

impl FloorRepository for SqliteRepository {
    fn load_tables(&self) -> Result<TableSet, FloorError> {
        let rows = self.broker.with_conn(&self.db_path, "floor.load_tables", |conn| {
            let mut stmt = conn.prepare(
                "SELECT t.number, r.name FROM tables t
                 JOIN restaurants r ON r.id = t.restaurant_id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })?;

        let mut restaurants = RestaurantCache::default();
        rows.into_iter()
            .map(|(number, restaurant)| Table::new(&number, restaurants.get(&restaurant)?))
            .collect()
    }

    fn load_waiters(&self) -> Result<FxHashSet<Waiter>, FloorError> {
        let names = self.broker.with_conn(&self.db_path, "floor.load_waiters", |conn| {
            let mut stmt = conn.prepare("SELECT name FROM waiters")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })?;

        names.iter().map(|name| Waiter::new(name)).collect()
    }

    fn load_assignments(&self) -> Result<FxHashMap<Waiter, TableSet>, FloorError> {
        let rows = self.broker.with_conn(&self.db_path, "floor.load_assignments", |conn| {
            let mut stmt = conn.prepare(
                "SELECT w.name, t.number, r.name FROM tables t
                 JOIN waiters w ON w.id = t.waiter_id
                 JOIN restaurants r ON r.id = t.restaurant_id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })?;

        let mut restaurants = RestaurantCache::default();
        let mut assignments: FxHashMap<Waiter, TableSet> = FxHashMap::default();
        for (waiter, number, restaurant) in rows {
            let table = Table::new(&number, restaurants.get(&restaurant)?)?;
            assignments
                .entry(Waiter::new(&waiter)?)
                .or_default()
                .insert(table);
        }
        Ok(assignments)
    }

    fn record_assignment(&self, table: &Table, waiter: &Waiter) -> Result<(), FloorError> {
        self.broker.with_conn(&self.db_path, "floor.assign", |conn| {
            let tx = conn.unchecked_transaction()?;
            let table_id = upsert_table(&tx, table)?;
            let waiter_id = upsert_waiter(&tx, waiter)?;
            tx.execute(
                "UPDATE tables SET waiter_id = ?1 WHERE id = ?2",
                params![waiter_id, table_id],
            )?;
            tx.commit()?;
            Ok(())
        })
    }
}

/// Hands out one `Restaurant` instance per name within a single load.
#[derive(Default)]
struct RestaurantCache {
    by_name: FxHashMap<String, Restaurant>,
}

impl RestaurantCache {
    fn get(&mut self, name: &str) -> Result<Restaurant, FloorError> {
        if let Some(r) = self.by_name.get(name) {
            return Ok(r.clone());
        }
        let r = Restaurant::new(name)?;
        self.by_name.insert(name.to_string(), r.clone());
        Ok(r)
    }
}

fn upsert_restaurant(conn: &Connection, restaurant: &Restaurant) -> Result<i64, FloorError> {
    conn.execute(
        "INSERT OR IGNORE INTO restaurants(name) VALUES(?1)",
        params![restaurant.name()],
    )?;
    let id = conn.query_row(
        "SELECT id FROM restaurants WHERE name = ?1",
        params![restaurant.name()],
        |row| row.get(0),
    )?;
    Ok(id)
}

fn upsert_table(conn: &Connection, table: &Table) -> Result<i64, FloorError> {
    let restaurant_id = upsert_restaurant(conn, table.restaurant())?;
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM tables WHERE number = ?1 AND restaurant_id = ?2",
            params![table.number(), restaurant_id],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO tables(number, restaurant_id) VALUES(?1, ?2)",
        params![table.number(), restaurant_id],
    )?;
    Ok(conn.last_insert_rowid())
}

fn upsert_waiter(conn: &Connection, waiter: &Waiter) -> Result<i64, FloorError> {
    conn.execute(
        "INSERT OR IGNORE INTO waiters(name) VALUES(?1)",
        params![waiter.name()],
    )?;
    let id = conn.query_row(
        "SELECT id FROM waiters WHERE name = ?1",
        params![waiter.name()],
        |row| row.get(0),
    )?;
    Ok(id)
}
