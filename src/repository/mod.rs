//! Persistence seam for the assignment engine.
//!
//! The engine reads the whole floor once and afterwards only writes single assignments back.

pub mod sqlite;

use crate::assignment::index::TableSet;
use crate::core::error::FloorError;
use crate::core::model::{Table, Waiter};
use rustc_hash::{FxHashMap, FxHashSet};

pub use sqlite::{SeedPlan, SeedReport, SqliteRepository};

pub trait FloorRepository {
    /// Every known table, assigned or not.
    fn load_tables(&self) -> Result<TableSet, FloorError>;

    /// Every known waiter, assigned or not.
    fn load_waiters(&self) -> Result<FxHashSet<Waiter>, FloorError>;

    /// Current waiter → tables mappings. Waiters without tables may be left out.
    fn load_assignments(&self) -> Result<FxHashMap<Waiter, TableSet>, FloorError>;

    /// Durably record that `waiter` now serves `table`, creating any missing restaurant,
    /// table, or waiter record. Either fully applied or an error.
    fn record_assignment(&self, table: &Table, waiter: &Waiter) -> Result<(), FloorError>;
}
