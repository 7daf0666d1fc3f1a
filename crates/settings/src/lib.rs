//! Persisted team configuration.
//!
//! The estimation engine takes its `TeamConfig` as an explicit argument;
//! this crate supplies the injected load/save capability callers use to keep
//! that configuration between sessions. Backends implement [`SettingsStore`];
//! a JSON-file store covers normal use and an in-memory store covers tests.

#![warn(missing_docs)]

mod store;

pub use store::{
    JsonSettingsStore, MemorySettingsStore, SettingsError, SettingsStore, SETTINGS_KEY,
};

/// Result alias for settings operations.
pub type Result<T> = std::result::Result<T, store::SettingsError>;
