//! Domain values: restaurants, their tables, and waiters.
//!
//! All three are immutable and compare by natural key. Names live in shared `Arc<str>`
//! storage, so a clone is the same instance and `same_instance` can tell a clone apart from
//! an equal value built elsewhere.

use crate::core::error::FloorError;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

fn non_empty(kind: &str, value: &str) -> Result<Arc<str>, FloorError> {
    if value.trim().is_empty() {
        return Err(FloorError::InvalidArgument(format!("{} must not be empty", kind)));
    }
    Ok(Arc::from(value))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Restaurant {
    name: Arc<str>,
}

impl Restaurant {
    pub fn new(name: &str) -> Result<Self, FloorError> {
        Ok(Self {
            name: non_empty("restaurant name", name)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

/// A table belongs to exactly one restaurant. Numbers are free-form ("12", "1A").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Table {
    number: Arc<str>,
    restaurant: Restaurant,
}

impl Table {
    pub fn new(number: &str, restaurant: Restaurant) -> Result<Self, FloorError> {
        Ok(Self {
            number: non_empty("table number", number)?,
            restaurant,
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn restaurant(&self) -> &Restaurant {
        &self.restaurant
    }

    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.number, &other.number) && self.restaurant.same_instance(&other.restaurant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Waiter {
    name: Arc<str>,
}

impl Waiter {
    pub fn new(name: &str) -> Result<Self, FloorError> {
        Ok(Self {
            name: non_empty("waiter name", name)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.name, &other.name)
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.restaurant, self.number)
    }
}

impl fmt::Display for Waiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
