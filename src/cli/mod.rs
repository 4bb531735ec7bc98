//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the storage layer.

pub mod file;
pub mod user;

pub use file::{handle_file_command, FileAction};
pub use user::{
    handle_restore_command, handle_show_command, handle_users_command, handle_verify_command,
};
