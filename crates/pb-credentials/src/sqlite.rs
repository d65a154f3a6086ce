// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! SQLite-backed credential store

use crate::{
    error::Result,
    pool::ConnectionPool,
    store::CredentialStore,
    types::{Credentials, UserId},
};
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, TransactionBehavior};
use std::path::Path;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS credentials (
        user_id   INTEGER      NOT NULL,
        service   VARCHAR(50)  NOT NULL,
        login     VARCHAR(100) NOT NULL,
        password  VARCHAR(100) NOT NULL,
        PRIMARY KEY (user_id, service)
    );
";

/// Credential store persisted in a SQLite database file.
///
/// The `(user_id, service)` primary key enforces the one-record-per-service
/// invariant, and `set` runs its insert-or-update inside an immediate
/// transaction so concurrent writers to the same key cannot create duplicates.
pub struct SqliteStore {
    pool: ConnectionPool,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run schema migrations
    pub async fn open(path: &Path, max_connections: usize) -> Result<Self> {
        let pool = ConnectionPool::new(path, max_connections)?;
        pool.with_connection(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        tracing::debug!(
            max_connections = pool.max_connections(),
            "Credential store migrations completed for {}",
            path.display()
        );
        Ok(Self { pool })
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn set(
        &self,
        user_id: UserId,
        service: &str,
        login: &str,
        password: &str,
    ) -> Result<bool> {
        let service = service.to_string();
        let login = login.to_string();
        let password = password.to_string();

        self.pool
            .with_connection(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let inserted = tx.execute(
                    "INSERT INTO credentials (user_id, service, login, password)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT (user_id, service) DO NOTHING",
                    params![user_id, service, login, password],
                )?;
                if inserted == 0 {
                    tx.execute(
                        "UPDATE credentials SET login = ?3, password = ?4
                         WHERE user_id = ?1 AND service = ?2",
                        params![user_id, service, login, password],
                    )?;
                }
                tx.commit()?;
                Ok(inserted == 1)
            })
            .await
    }

    async fn get(&self, user_id: UserId, service: &str) -> Result<Option<Credentials>> {
        let service = service.to_string();

        self.pool
            .with_connection(move |conn| {
                let credentials = conn
                    .query_row(
                        "SELECT login, password FROM credentials
                         WHERE user_id = ?1 AND service = ?2",
                        params![user_id, service],
                        |row| {
                            Ok(Credentials {
                                login: row.get(0)?,
                                password: row.get(1)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(credentials)
            })
            .await
    }

    async fn del(&self, user_id: UserId, service: &str) -> Result<bool> {
        let service = service.to_string();

        self.pool
            .with_connection(move |conn| {
                let affected = conn.execute(
                    "DELETE FROM credentials WHERE user_id = ?1 AND service = ?2",
                    params![user_id, service],
                )?;
                Ok(affected > 0)
            })
            .await
    }

    async fn services(&self, user_id: UserId) -> Result<Vec<String>> {
        self.pool
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT service FROM credentials WHERE user_id = ?1 ORDER BY service",
                )?;
                let services = stmt
                    .query_map(params![user_id], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(services)
            })
            .await
    }
}
