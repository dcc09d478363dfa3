//! Project configuration, read from `.floorplan/floorplan.toml`.
//!
//! ```toml
//! capacity = 4        # tables one waiter may hold per restaurant
//! actor = "floorplan" # name stamped on audit events
//! ```
//!
//! A missing file means defaults. `FLOORPLAN_CAPACITY` overrides `capacity`.

use crate::core::error::FloorError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "floorplan.toml";
pub const CAPACITY_ENV: &str = "FLOORPLAN_CAPACITY";

/// Tables one waiter may serve in a single restaurant.
pub const DEFAULT_CAPACITY: usize = 4;
pub const DEFAULT_ACTOR: &str = "floorplan";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloorConfig {
    pub capacity: usize,
    pub actor: String,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            actor: DEFAULT_ACTOR.to_string(),
        }
    }
}

impl FloorConfig {
    pub fn validate(&self) -> Result<(), FloorError> {
        if self.capacity == 0 {
            return Err(FloorError::ValidationError(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.actor.trim().is_empty() {
            return Err(FloorError::ValidationError(
                "actor must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE_NAME)
}

/// Load config from `<project_dir>/floorplan.toml`, then apply the environment override.
pub fn load_config(project_dir: &Path) -> Result<FloorConfig, FloorError> {
    let path = config_path(project_dir);
    let mut config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        FloorConfig::default()
    };

    if let Ok(raw) = std::env::var(CAPACITY_ENV) {
        config.capacity = parse_capacity(&raw)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_capacity(raw: &str) -> Result<usize, FloorError> {
    raw.trim().parse::<usize>().map_err(|e| {
        FloorError::ValidationError(format!(
            "{} must be an integer ('{}'): {}",
            CAPACITY_ENV, raw, e
        ))
    })
}
