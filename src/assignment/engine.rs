use crate::assignment::constraint::within_capacity;
use crate::assignment::loader::LoadState;
use crate::assignment::query::{self, TableAssignments, TablesByRestaurant, WaiterTables};
use crate::assignment::suggest::suggest_waiters;
use crate::core::config::DEFAULT_CAPACITY;
use crate::core::error::FloorError;
use crate::core::model::{Restaurant, Table, Waiter};
use crate::repository::FloorRepository;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Result of an assignment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// The waiter now serves the table.
    Assigned,
    /// The waiter is at capacity in the table's restaurant. Nothing changed; these waiters
    /// could take the table instead (possibly none).
    Rejected { suggestions: FxHashSet<Waiter> },
    /// A by-name request named something the floor does not know.
    Unresolved(UnresolvedKey),
}

impl AssignOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignOutcome::Assigned)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnresolvedKey {
    Waiter { name: String },
    Table { restaurant: String, number: String },
}

/// Assigns waiters to tables under the per-restaurant capacity limit.
///
/// The floor is read from the repository on the first call and kept in memory afterwards;
/// only successful assignments are written back.
pub struct AssignmentEngine<R> {
    repo: R,
    capacity: usize,
    state: LoadState,
}

impl<R: FloorRepository> AssignmentEngine<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            capacity: DEFAULT_CAPACITY,
            state: LoadState::Unloaded,
        }
    }

    pub fn with_capacity(repo: R, capacity: usize) -> Result<Self, FloorError> {
        if capacity == 0 {
            return Err(FloorError::InvalidArgument(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            repo,
            capacity,
            state: LoadState::Unloaded,
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn assign(&mut self, waiter: &Waiter, table: &Table) -> Result<AssignOutcome, FloorError> {
        let capacity = self.capacity;
        let floor = self.state.ensure(&self.repo)?;
        let restaurant = table.restaurant();

        if !within_capacity(floor.index.tables_of(waiter), restaurant, capacity) {
            let suggestions =
                suggest_waiters(&floor.waiters, waiter, restaurant, &floor.index, capacity);
            return Ok(AssignOutcome::Rejected { suggestions });
        }

        floor.index.place(waiter.clone(), table.clone());
        // The write upserts both records, so the loaded universe has to know them too.
        floor.tables.insert(table.clone());
        floor.waiters.insert(waiter.clone());
        self.repo.record_assignment(table, waiter)?;
        Ok(AssignOutcome::Assigned)
    }

    pub fn assign_by_name(
        &mut self,
        waiter_name: &str,
        restaurant_name: &str,
        table_number: &str,
    ) -> Result<AssignOutcome, FloorError> {
        let floor = self.state.ensure(&self.repo)?;

        let Some(waiter) = query::find_waiter(floor, waiter_name).cloned() else {
            return Ok(AssignOutcome::Unresolved(UnresolvedKey::Waiter {
                name: waiter_name.to_string(),
            }));
        };
        let Some(table) = query::find_table(floor, restaurant_name, table_number).cloned() else {
            return Ok(AssignOutcome::Unresolved(UnresolvedKey::Table {
                restaurant: restaurant_name.to_string(),
                number: table_number.to_string(),
            }));
        };

        self.assign(&waiter, &table)
    }

    /// Every table of `restaurant` with its waiter, if any.
    pub fn assignments_for(
        &mut self,
        restaurant: &Restaurant,
    ) -> Result<TableAssignments, FloorError> {
        let floor = self.state.ensure(&self.repo)?;
        Ok(query::assignments_for(floor, restaurant))
    }

    /// Empty when no known table belongs to a restaurant of that name.
    pub fn assignments_for_name(
        &mut self,
        restaurant_name: &str,
    ) -> Result<TableAssignments, FloorError> {
        let floor: &_ = self.state.ensure(&self.repo)?;
        Ok(query::find_restaurant(floor, restaurant_name)
            .map(|restaurant| query::assignments_for(floor, restaurant))
            .unwrap_or_default())
    }

    pub fn tables_for(&mut self, waiter: &Waiter) -> Result<TablesByRestaurant, FloorError> {
        let floor = self.state.ensure(&self.repo)?;
        Ok(query::tables_for(&floor.index, waiter))
    }

    pub fn tables_for_name(&mut self, waiter_name: &str) -> Result<TablesByRestaurant, FloorError> {
        let floor: &_ = self.state.ensure(&self.repo)?;
        Ok(query::find_waiter(floor, waiter_name)
            .map(|waiter| query::tables_for(&floor.index, waiter))
            .unwrap_or_default())
    }

    pub fn all_tables(&mut self) -> Result<WaiterTables, FloorError> {
        let floor = self.state.ensure(&self.repo)?;
        Ok(query::all_tables(&floor.index))
    }
}
