// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Storage backend configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default upper bound on concurrently open SQLite connections
pub const DEFAULT_MAX_CONNECTIONS: usize = 10;

/// Which credential store implementation to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, lost on restart
    #[default]
    Memory,
    /// SQLite database file
    Sqlite,
}

/// Storage-related configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file, required for the SQLite backend
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Connection pool size for the SQLite backend
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_max_connections() -> usize {
    DEFAULT_MAX_CONNECTIONS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl StorageConfig {
    /// Configuration for an in-memory store
    pub fn memory() -> Self {
        Self::default()
    }

    /// Configuration for a SQLite store at `path`
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: Some(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Check the section for values no backend can work with
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(Error::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        if self.backend == StorageBackend::Sqlite {
            self.sqlite_path()?;
        }

        Ok(())
    }

    /// Get the SQLite database path
    pub fn sqlite_path(&self) -> Result<&Path> {
        match self.path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(Error::Config(
                "sqlite backend requires a database path".to_string(),
            )),
        }
    }
}
