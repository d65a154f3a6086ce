// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Bot error types

use crate::commands::messages;

/// Result of a command handler: the reply text on success
pub type CommandResult = Result<String, CommandError>;

/// Errors produced by command handlers
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Malformed arguments or an unknown service; the text is shown to the user as is
    #[error("{0}")]
    Usage(String),

    /// The credential store failed while serving the command
    #[error("{operation} failed: {source}")]
    Handler {
        operation: &'static str,
        source: pb_credentials::Error,
    },
}

impl CommandError {
    pub fn usage(text: impl Into<String>) -> Self {
        CommandError::Usage(text.into())
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, CommandError::Usage(_))
    }

    /// Text to send back to the user for this error
    pub fn user_message(&self) -> &str {
        match self {
            CommandError::Usage(text) => text,
            CommandError::Handler { .. } => messages::RETRY,
        }
    }
}

/// Errors talking to the Bot API
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection or decoding failure; never carries the request URL
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Invalid Bot API URL: {0}")]
    Url(String),

    #[error("Unexpected Bot API response ({status}): {body}")]
    UnexpectedResponse {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Bot API call {method} failed: {description}")]
    Api { method: String, description: String },

    #[error("Bot API call {0} returned no result")]
    MissingResult(String),
}

// Request URLs embed the bot token
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(err.without_url())
    }
}

/// Bot result type
pub type BotResult<T> = Result<T, BotError>;

/// Errors that stop the bot from starting or running
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] pb_credentials::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Server error: {0}")]
    Server(String),
}
