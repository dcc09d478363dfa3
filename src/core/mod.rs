//! Shared primitives: domain values, errors, config, storage, and the audit broker.

pub mod broker;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod output;
pub mod schemas;
pub mod store;
pub mod time;
