// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Per-user credential storage for the password bot.
//!
//! This crate provides:
//! - The [`CredentialStore`] contract: set-or-update, lookup, delete and
//!   service enumeration keyed by `(user_id, service)`
//! - An in-memory backend guarded by a single lock
//! - A SQLite backend with a bounded connection pool
//! - The field validation predicate shared by command handlers

pub mod config;
pub mod error;
pub mod memory;
mod pool;
pub mod sqlite;
pub mod store;
pub mod types;
pub mod validation;

/// Re-export key types for convenience
pub use config::{StorageBackend, StorageConfig};
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{open_store, CredentialStore};
pub use types::{CredentialRecord, Credentials, UserId};
pub use validation::{validate_field, validate_fields, MAX_FIELD_LEN};
