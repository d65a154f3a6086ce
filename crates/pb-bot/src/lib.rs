// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Password bot
//!
//! A chat bot that remembers logins and passwords per user and service. Updates
//! arrive through a webhook, each one is dispatched on its own task to the
//! command handlers, and replies go back through the Bot API.

pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod server;
pub mod state;
pub mod telegram;
pub mod transport;

pub use commands::{Command, CredentialsHandler};
pub use config::BotConfig;
pub use dispatcher::Dispatcher;
pub use error::{BotError, BotResult, CommandError, CommandResult, TransportError};
pub use server::BotServer;
pub use state::AppState;
pub use telegram::TelegramClient;
pub use transport::MessageTransport;
