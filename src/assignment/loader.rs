//! One-time hydration of the in-memory floor from the repository.

use crate::assignment::index::{AssignmentIndex, TableSet};
use crate::core::error::FloorError;
use crate::core::model::Waiter;
use crate::repository::FloorRepository;
use rustc_hash::FxHashSet;

/// Everything the engine works on once loaded.
#[derive(Debug, Clone, Default)]
pub struct Floor {
    /// All known tables.
    pub tables: TableSet,
    /// All known waiters.
    pub waiters: FxHashSet<Waiter>,
    pub index: AssignmentIndex,
}

impl Floor {
    /// Read tables, waiters, and assignments. Nothing is kept if any read fails.
    pub fn load<R: FloorRepository + ?Sized>(repo: &R) -> Result<Self, FloorError> {
        let tables = repo.load_tables()?;
        let waiters = repo.load_waiters()?;
        let assignments = repo.load_assignments()?;
        Ok(Self {
            tables,
            waiters,
            index: AssignmentIndex::from_assignments(assignments),
        })
    }
}

#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded(Floor),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    /// The loaded floor, reading it from `repo` on first use. A failed load leaves the state
    /// `Unloaded` so the next call retries from scratch.
    pub fn ensure<R: FloorRepository + ?Sized>(
        &mut self,
        repo: &R,
    ) -> Result<&mut Floor, FloorError> {
        if let LoadState::Unloaded = self {
            *self = LoadState::Loaded(Floor::load(repo)?);
        }
        match self {
            LoadState::Loaded(floor) => Ok(floor),
            LoadState::Unloaded => Err(FloorError::ValidationError(
                "floor state missing after load".to_string(),
            )),
        }
    }
}
