//! Obfuscation of stored text
//!
//! The user files and the credential index are hidden behind a keyed
//! character shift. It keeps casual readers out and nothing more.

pub mod shift;

pub use shift::{
    obfuscate, obfuscation_collision, reveal, reveal_collision, LINE_TERMINATOR,
    RECORD_SEPARATOR,
};
