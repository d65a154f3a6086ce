// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Bot configuration

use crate::error::{BotError, BotResult};
use crate::telegram::DEFAULT_API_URL;
use pb_credentials::StorageConfig;
use pb_logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SECRET_TTL_SECS: u64 = 10;

/// Bot configuration loaded from a YAML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot API token
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub server: ServerSection,

    /// Bot API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Seconds before messages carrying secrets are deleted
    #[serde(default = "default_secret_ttl_secs")]
    pub secret_ttl_secs: u64,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Webhook server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Public URL the Bot API delivers updates to; webhook registration is
    /// skipped when empty
    #[serde(default)]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Local address to listen on
    #[serde(default = "default_bind")]
    pub bind: IpAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT,
            bind: default_bind(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            server: ServerSection::default(),
            api_url: default_api_url(),
            secret_ttl_secs: DEFAULT_SECRET_TTL_SECS,
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_secret_ttl_secs() -> u64 {
    DEFAULT_SECRET_TTL_SECS
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

impl BotConfig {
    /// Read and parse a YAML configuration file
    pub fn load(path: &Path) -> BotResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> BotResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Check settings that cannot be expressed in the file format
    pub fn validate(&self) -> BotResult<()> {
        if self.token.trim().is_empty() {
            return Err(BotError::Config("bot token is not set".to_string()));
        }
        if self.secret_ttl_secs == 0 {
            return Err(BotError::Config(
                "secret_ttl_secs must be greater than zero".to_string(),
            ));
        }
        if !self.server.host.is_empty() && url::Url::parse(&self.server.host).is_err() {
            return Err(BotError::Config(format!(
                "server.host is not a valid URL: {}",
                self.server.host
            )));
        }
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.bind, self.server.port)
    }

    pub fn secret_ttl(&self) -> Duration {
        Duration::from_secs(self.secret_ttl_secs)
    }

    /// Webhook URL to register, if any
    pub fn webhook_url(&self) -> Option<&str> {
        if self.server.host.is_empty() {
            None
        } else {
            Some(&self.server.host)
        }
    }
}
