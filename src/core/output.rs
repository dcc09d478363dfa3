//! Stable, sorted views of engine results for CLI output.
//!
//! The engine hands back hash maps keyed by domain values; these rows order them by name so
//! text and JSON output are deterministic.

use crate::assignment::query::{TableAssignments, TablesByRestaurant, WaiterTables};
use crate::core::model::Waiter;
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRow {
    pub table: String,
    pub waiter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantTables {
    pub restaurant: String,
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaiterRow {
    pub waiter: String,
    pub restaurants: Vec<RestaurantTables>,
}

pub fn assignment_rows(view: &TableAssignments) -> Vec<AssignmentRow> {
    let mut rows: Vec<AssignmentRow> = view
        .iter()
        .map(|(table, waiter)| AssignmentRow {
            table: table.number().to_string(),
            waiter: waiter.as_ref().map(|w| w.name().to_string()),
        })
        .collect();
    rows.sort_by(|a, b| natural_cmp(&a.table, &b.table));
    rows
}

pub fn restaurant_rows(grouped: &TablesByRestaurant) -> Vec<RestaurantTables> {
    let mut rows: Vec<RestaurantTables> = grouped
        .iter()
        .map(|(restaurant, tables)| {
            let mut numbers: Vec<String> = tables.iter().map(|t| t.number().to_string()).collect();
            numbers.sort_by(|a, b| natural_cmp(a, b));
            RestaurantTables {
                restaurant: restaurant.name().to_string(),
                tables: numbers,
            }
        })
        .collect();
    rows.sort_by(|a, b| natural_cmp(&a.restaurant, &b.restaurant));
    rows
}

pub fn waiter_rows(all: &WaiterTables) -> Vec<WaiterRow> {
    let mut rows: Vec<WaiterRow> = all
        .iter()
        .map(|(waiter, grouped)| WaiterRow {
            waiter: waiter.name().to_string(),
            restaurants: restaurant_rows(grouped),
        })
        .collect();
    rows.sort_by(|a, b| natural_cmp(&a.waiter, &b.waiter));
    rows
}

pub fn waiter_names(waiters: &FxHashSet<Waiter>) -> Vec<String> {
    let mut names: Vec<String> = waiters.iter().map(|w| w.name().to_string()).collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    names
}

/// Comma-joined list bounded to `max_items`, e.g. `Waiter2, Waiter3 (+4 more)`.
pub fn preview_names(names: &[String], max_items: usize) -> String {
    if names.is_empty() {
        return "none".to_string();
    }
    let shown = names
        .iter()
        .take(max_items)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > max_items {
        format!("{} (+{} more)", shown, names.len() - max_items)
    } else {
        shown
    }
}

/// Orders `Table2` before `Table10` by comparing the trailing number when the prefixes match.
fn natural_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    fn split(s: &str) -> (&str, Option<u64>) {
        let digits = s.len() - s.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let (head, tail) = s.split_at(s.len() - digits);
        (head, tail.parse().ok())
    }
    let (ha, na) = split(a);
    let (hb, nb) = split(b);
    ha.cmp(hb).then(na.cmp(&nb)).then(a.cmp(b))
}
