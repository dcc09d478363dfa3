use crate::assignment::engine::{AssignOutcome, AssignmentEngine};
use crate::assignment::query::{TableAssignments, TablesByRestaurant, WaiterTables};
use crate::core::error::FloorError;
use crate::core::model::{Restaurant, Table, Waiter};
use crate::repository::FloorRepository;
use std::sync::Mutex;

/// Lock-guarded engine for hosts that serve several callers at once.
///
/// Each call holds the lock across the lazy load and any index update, so no caller sees the
/// two index directions out of step.
pub struct SharedEngine<R> {
    inner: Mutex<AssignmentEngine<R>>,
}

impl<R: FloorRepository> SharedEngine<R> {
    pub fn new(engine: AssignmentEngine<R>) -> Self {
        Self {
            inner: Mutex::new(engine),
        }
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with_engine<F, T>(&self, f: F) -> Result<T, FloorError>
    where
        F: FnOnce(&mut AssignmentEngine<R>) -> Result<T, FloorError>,
    {
        let mut engine = self
            .inner
            .lock()
            .map_err(|_| FloorError::ValidationError("engine lock poisoned".to_string()))?;
        f(&mut engine)
    }

    pub fn assign(&self, waiter: &Waiter, table: &Table) -> Result<AssignOutcome, FloorError> {
        self.with_engine(|e| e.assign(waiter, table))
    }

    pub fn assignments_for(&self, restaurant: &Restaurant) -> Result<TableAssignments, FloorError> {
        self.with_engine(|e| e.assignments_for(restaurant))
    }

    pub fn tables_for(&self, waiter: &Waiter) -> Result<TablesByRestaurant, FloorError> {
        self.with_engine(|e| e.tables_for(waiter))
    }

    pub fn assign_by_name(
        &self,
        waiter: &str,
        restaurant: &str,
        table: &str,
    ) -> Result<AssignOutcome, FloorError> {
        self.with_engine(|e| e.assign_by_name(waiter, restaurant, table))
    }

    pub fn assignments_for_name(&self, restaurant: &str) -> Result<TableAssignments, FloorError> {
        self.with_engine(|e| e.assignments_for_name(restaurant))
    }

    pub fn tables_for_name(&self, waiter: &str) -> Result<TablesByRestaurant, FloorError> {
        self.with_engine(|e| e.tables_for_name(waiter))
    }

    pub fn all_tables(&self) -> Result<WaiterTables, FloorError> {
        self.with_engine(|e| e.all_tables())
    }

    pub fn into_inner(self) -> Result<AssignmentEngine<R>, FloorError> {
        self.inner
            .into_inner()
            .map_err(|_| FloorError::ValidationError("engine lock poisoned".to_string()))
    }
}
