// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Logging configuration types

use crate::{CliLogLevel, LogFormat};
use serde::{Deserialize, Serialize};

/// Logging section of the bot configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Logging verbosity level
    #[serde(default)]
    pub level: Option<CliLogLevel>,

    /// Output format
    #[serde(default)]
    pub format: Option<LogFormat>,

    /// Log file; console logging when unset
    #[serde(default)]
    pub file: Option<String>,
}
