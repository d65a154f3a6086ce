// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Bot commands and their handlers

pub mod handler;
pub mod messages;

pub use handler::CredentialsHandler;

use std::fmt;

/// A command the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Set,
    Get,
    Del,
    GetServices,
    Help,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::Start,
        Command::Set,
        Command::Get,
        Command::Del,
        Command::GetServices,
        Command::Help,
    ];

    /// Match a command token such as `/get`; tokens are case-sensitive
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.as_str() == token)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::Set => "/set",
            Command::Get => "/get",
            Command::Del => "/del",
            Command::GetServices => "/getServices",
            Command::Help => "/help",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split message text at the first space into the command token and its argument string.
///
/// The argument string keeps every character after that first space, so
/// `"/get  mail"` yields `("/get", " mail")`.
pub fn split_command(text: &str) -> (&str, &str) {
    text.split_once(' ').unwrap_or((text, ""))
}
