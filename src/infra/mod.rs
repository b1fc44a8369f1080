//! Infrastructure layer: config, logging, cache/database handles, and OS
//! integrations.

pub mod cache;
pub mod config;
pub mod daemon;
pub mod database;
pub mod error;
pub mod logging;
