// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! In-memory credential store
//!
//! A single lock guards a flat list of records that is scanned linearly on
//! every operation. Users keep a handful of services each, so there is no
//! index; a deployment with many records per user should key the records by
//! `(user_id, service)` in a concurrent map or shard the lock instead.

use crate::{
    error::Result,
    store::CredentialStore,
    types::{CredentialRecord, Credentials, UserId},
};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Process-local credential store
#[derive(Debug)]
pub struct MemoryStore {
    records: Mutex<Vec<CredentialRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::with_capacity(10)),
        }
    }

    /// Number of records across all users
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Check if the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn set(
        &self,
        user_id: UserId,
        service: &str,
        login: &str,
        password: &str,
    ) -> Result<bool> {
        let mut records = self.records.lock().await;

        if let Some(record) = records.iter_mut().find(|r| r.is_key(user_id, service)) {
            record.update(login, password);
            return Ok(false);
        }

        records.push(CredentialRecord::new(user_id, service, login, password));
        Ok(true)
    }

    async fn get(&self, user_id: UserId, service: &str) -> Result<Option<Credentials>> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .find(|r| r.is_key(user_id, service))
            .map(CredentialRecord::credentials))
    }

    async fn del(&self, user_id: UserId, service: &str) -> Result<bool> {
        let mut records = self.records.lock().await;

        match records.iter().position(|r| r.is_key(user_id, service)) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn services(&self, user_id: UserId) -> Result<Vec<String>> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.service.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_updates_in_place() {
        let store = MemoryStore::new();

        assert!(store.set(1, "mail", "first", "one").await.unwrap());
        assert!(!store.set(1, "mail", "second", "two").await.unwrap());

        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get(1, "mail").await.unwrap(),
            Some(Credentials::new("second", "two"))
        );
    }

    #[tokio::test]
    async fn test_services_preserve_insertion_order() {
        let store = MemoryStore::new();
        store.set(1, "mail", "a", "b").await.unwrap();
        store.set(2, "bank", "a", "b").await.unwrap();
        store.set(1, "chat", "a", "b").await.unwrap();

        assert_eq!(
            store.services(1).await.unwrap(),
            vec!["mail".to_string(), "chat".to_string()]
        );
    }

    #[tokio::test]
    async fn test_del_only_removes_matching_record() {
        let store = MemoryStore::new();
        store.set(1, "mail", "a", "b").await.unwrap();
        store.set(2, "mail", "c", "d").await.unwrap();

        assert!(store.del(1, "mail").await.unwrap());
        assert!(!store.del(1, "mail").await.unwrap());

        assert_eq!(store.len().await, 1);
        assert!(store.get(2, "mail").await.unwrap().is_some());
    }
}
