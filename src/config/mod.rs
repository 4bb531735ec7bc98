//! Configuration module for the ledger store
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Settings persistence (global index key, backup preference)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
