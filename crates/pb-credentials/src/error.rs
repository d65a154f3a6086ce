// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for the credential store

use thiserror::Error;

/// Result type alias for credential store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Storage faults raised by a credential store.
///
/// A missing record is never an error: lookups report absence through their
/// success value, so anything surfacing here is an operational problem.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),
}
