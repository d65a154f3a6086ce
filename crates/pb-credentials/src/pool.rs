// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Bounded pool of SQLite connections
//!
//! A semaphore caps the number of connections in use; idle connections are
//! kept for reuse and new ones are opened lazily. Queries run on the blocking
//! thread pool so the async runtime never waits on disk I/O.

use crate::error::{Error, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) struct ConnectionPool {
    path: PathBuf,
    max_connections: usize,
    idle: Mutex<Vec<Connection>>,
    permits: Arc<Semaphore>,
}

impl ConnectionPool {
    pub(crate) fn new(path: &Path, max_connections: usize) -> Result<Self> {
        if max_connections == 0 {
            return Err(Error::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            max_connections,
            idle: Mutex::new(Vec::with_capacity(max_connections)),
            permits: Arc::new(Semaphore::new(max_connections)),
        })
    }

    pub(crate) fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Connections opened and currently parked for reuse
    #[cfg(test)]
    pub(crate) fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    /// Run `f` on a pooled connection, waiting for a free slot if all are busy
    pub(crate) async fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let _permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| Error::Pool("connection pool is closed".to_string()))?;

        let idle = self.take_idle()?;
        let path = self.path.clone();

        let (conn, result) = tokio::task::spawn_blocking(move || {
            let mut conn = match idle {
                Some(conn) => conn,
                None => match open_connection(&path) {
                    Ok(conn) => conn,
                    Err(err) => return (None, Err(err)),
                },
            };
            let result = f(&mut conn);
            (Some(conn), result)
        })
        .await?;

        if let Some(conn) = conn {
            self.release(conn)?;
        }

        result
    }

    fn take_idle(&self) -> Result<Option<Connection>> {
        let mut idle = self
            .idle
            .lock()
            .map_err(|_| Error::Pool("idle connection list is poisoned".to_string()))?;
        Ok(idle.pop())
    }

    fn release(&self, conn: Connection) -> Result<()> {
        let mut idle = self
            .idle
            .lock()
            .map_err(|_| Error::Pool("idle connection list is poisoned".to_string()))?;
        idle.push(conn);
        Ok(())
    }
}

fn open_connection(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
    tracing::debug!("Opened SQLite connection to {}", path.display());
    Ok(conn)
}
