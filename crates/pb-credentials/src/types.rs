// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Core types for the credential store

use std::fmt;

/// Chat platform user identifier, supplied by the transport layer
pub type UserId = i64;

/// A stored credential, keyed by `(user_id, service)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    /// Owner of the record
    pub user_id: UserId,

    /// Name of the external account the credential belongs to
    pub service: String,

    pub login: String,

    pub password: String,
}

impl CredentialRecord {
    /// Create a new record
    pub fn new(user_id: UserId, service: &str, login: &str, password: &str) -> Self {
        Self {
            user_id,
            service: service.to_string(),
            login: login.to_string(),
            password: password.to_string(),
        }
    }

    /// Check whether this record is the one stored under `(user_id, service)`
    pub fn is_key(&self, user_id: UserId, service: &str) -> bool {
        self.user_id == user_id && self.service == service
    }

    /// Overwrite login and password in place
    pub fn update(&mut self, login: &str, password: &str) {
        self.login = login.to_string();
        self.password = password.to_string();
    }

    /// The login/password pair of this record
    pub fn credentials(&self) -> Credentials {
        Credentials {
            login: self.login.clone(),
            password: self.password.clone(),
        }
    }
}

/// Login/password pair returned by a lookup
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            login: login.to_string(),
            password: password.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
