//! ledger-cli - Per-user obfuscated record store for a personal-finance ledger
//!
//! Each user's accounts, transactions and budgets are kept in a single text
//! file. The file is sealed with a SHA-256 line, obfuscated with the user's
//! shift key, and replaced atomically on every save.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `crypto`: The reversible character-shift cipher
//! - `models`: Core data models (accounts, transactions, budgets, credentials)
//! - `storage`: Record codec, integrity envelope, reader and writer
//! - `backup`: Previous-version backup and restore
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_cli::config::{paths::LedgerPaths, settings::Settings};
//! use ledger_cli::storage::UserStore;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = UserStore::with_settings(paths, &settings);
//! let report = store.load("12345678", 14)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
