// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The credential store contract shared by every backend

use crate::{
    config::{StorageBackend, StorageConfig},
    error::Result,
    memory::MemoryStore,
    sqlite::SqliteStore,
    types::{Credentials, UserId},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Persistent storage of `(user, service) -> (login, password)` records.
///
/// At most one record exists per `(user_id, service)`. Implementations must be
/// safe to call concurrently; concurrent writes to the same key resolve as
/// last-write-wins. A missing record is reported through the success value and
/// never as an error.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert or overwrite the credentials for `(user_id, service)`.
    ///
    /// Returns `true` when a new record was created and `false` when an
    /// existing one was updated in place.
    async fn set(
        &self,
        user_id: UserId,
        service: &str,
        login: &str,
        password: &str,
    ) -> Result<bool>;

    /// Look up the credentials for `(user_id, service)`
    async fn get(&self, user_id: UserId, service: &str) -> Result<Option<Credentials>>;

    /// Remove the record for `(user_id, service)`, returning whether it existed
    async fn del(&self, user_id: UserId, service: &str) -> Result<bool>;

    /// All service names stored for `user_id`; empty when the user has none
    async fn services(&self, user_id: UserId) -> Result<Vec<String>>;
}

/// Open the store selected by `config`
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn CredentialStore>> {
    config.validate()?;

    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory credential store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            let path = config.sqlite_path()?;
            tracing::info!(
                "Using SQLite credential store at {} (max {} connections)",
                path.display(),
                config.max_connections
            );
            let store = SqliteStore::open(path, config.max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}
