//! Store handle for Floorplan's on-disk state.
//!
//! A project keeps everything under `<dir>/.floorplan/`: the config file at the top and the
//! database plus audit log in `data/`.

use crate::core::error::FloorError;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name that marks a Floorplan project.
pub const PROJECT_DIR_NAME: &str = ".floorplan";

/// Store handle representing a Floorplan data workspace.
#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute path to the store root directory (`<dir>/.floorplan/data`)
    pub root: PathBuf,
}

impl Store {
    /// Store rooted under the project directory `dir`.
    pub fn for_project(dir: &Path) -> Self {
        Self {
            root: dir.join(PROJECT_DIR_NAME).join("data"),
        }
    }

    /// Create the store directory if it does not exist yet.
    pub fn ensure(&self) -> Result<(), FloorError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// The `.floorplan` directory holding config and data.
    pub fn project_dir(&self) -> Option<&Path> {
        self.root.parent()
    }
}
