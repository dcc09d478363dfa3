//! Two-way assignment index: waiter → tables and table → waiter.
//!
//! Both maps are only ever changed together through `place`, so every table listed under a
//! waiter maps back to that waiter and no table sits under two waiters.

use crate::core::model::{Table, Waiter};
use rustc_hash::{FxHashMap, FxHashSet};

pub type TableSet = FxHashSet<Table>;

#[derive(Debug, Default, Clone)]
pub struct AssignmentIndex {
    waiter_tables: FxHashMap<Waiter, TableSet>,
    table_waiter: FxHashMap<Table, Waiter>,
}

impl AssignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build both directions from persisted waiter → tables mappings.
    pub fn from_assignments(assignments: FxHashMap<Waiter, TableSet>) -> Self {
        let mut index = Self::new();
        for (waiter, tables) in assignments {
            if tables.is_empty() {
                index.waiter_tables.entry(waiter).or_default();
                continue;
            }
            for table in tables {
                index.place(waiter.clone(), table);
            }
        }
        index
    }

    pub fn tables_of(&self, waiter: &Waiter) -> Option<&TableSet> {
        self.waiter_tables.get(waiter)
    }

    pub fn waiter_of(&self, table: &Table) -> Option<&Waiter> {
        self.table_waiter.get(table)
    }

    /// Waiters with a tracked table set (possibly emptied by reassignment).
    pub fn waiters(&self) -> impl Iterator<Item = (&Waiter, &TableSet)> {
        self.waiter_tables.iter()
    }

    /// Give `table` to `waiter`, taking it away from whoever held it before.
    pub fn place(&mut self, waiter: Waiter, table: Table) {
        if let Some(previous) = self.table_waiter.get(&table)
            && !previous.same_instance(&waiter)
            && let Some(held) = self.waiter_tables.get_mut(previous)
        {
            held.remove(&table);
        }

        self.table_waiter.insert(table.clone(), waiter.clone());
        self.waiter_tables.entry(waiter).or_default().insert(table);
    }

    /// True when both directions describe the same relation.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let forward = self.waiter_tables.iter().all(|(waiter, tables)| {
            tables
                .iter()
                .all(|t| self.table_waiter.get(t) == Some(waiter))
        });
        let listed: usize = self.waiter_tables.values().map(|t| t.len()).sum();
        forward && listed == self.table_waiter.len()
    }
}
