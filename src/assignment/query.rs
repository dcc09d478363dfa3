//! Read-only views over a loaded floor, plus natural-key lookups for the by-name calls.

use crate::assignment::index::{AssignmentIndex, TableSet};
use crate::assignment::loader::Floor;
use crate::core::model::{Restaurant, Table, Waiter};
use rustc_hash::FxHashMap;

/// Each table of a restaurant with its waiter, `None` when unassigned.
pub type TableAssignments = FxHashMap<Table, Option<Waiter>>;

pub type TablesByRestaurant = FxHashMap<Restaurant, TableSet>;

pub type WaiterTables = FxHashMap<Waiter, TablesByRestaurant>;

pub fn assignments_for(floor: &Floor, restaurant: &Restaurant) -> TableAssignments {
    floor
        .tables
        .iter()
        .filter(|t| t.restaurant() == restaurant)
        .map(|t| (t.clone(), floor.index.waiter_of(t).cloned()))
        .collect()
}

pub fn group_by_restaurant<'a>(tables: impl IntoIterator<Item = &'a Table>) -> TablesByRestaurant {
    let mut grouped = TablesByRestaurant::default();
    for table in tables {
        grouped
            .entry(table.restaurant().clone())
            .or_default()
            .insert(table.clone());
    }
    grouped
}

pub fn tables_for(index: &AssignmentIndex, waiter: &Waiter) -> TablesByRestaurant {
    index
        .tables_of(waiter)
        .map(|tables| group_by_restaurant(tables))
        .unwrap_or_default()
}

/// Grouped tables for every waiter currently holding at least one table.
pub fn all_tables(index: &AssignmentIndex) -> WaiterTables {
    index
        .waiters()
        .filter(|(_, tables)| !tables.is_empty())
        .map(|(waiter, tables)| (waiter.clone(), group_by_restaurant(tables)))
        .collect()
}

pub fn find_restaurant<'a>(floor: &'a Floor, name: &str) -> Option<&'a Restaurant> {
    floor
        .tables
        .iter()
        .map(Table::restaurant)
        .find(|r| r.name() == name)
}

pub fn find_waiter<'a>(floor: &'a Floor, name: &str) -> Option<&'a Waiter> {
    floor
        .waiters
        .iter()
        .chain(floor.index.waiters().map(|(w, _)| w))
        .find(|w| w.name() == name)
}

pub fn find_table<'a>(floor: &'a Floor, restaurant: &str, number: &str) -> Option<&'a Table> {
    floor
        .tables
        .iter()
        .find(|t| t.number() == number && t.restaurant().name() == restaurant)
}
