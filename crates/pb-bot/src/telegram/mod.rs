// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Bot API client and wire types

pub mod client;
pub mod types;

pub use client::{TelegramClient, DEFAULT_API_URL};
pub use types::{
    ApiResponse, Chat, ChatId, KeyboardButton, Message, MessageId, ReplyKeyboardMarkup, Update,
    User,
};
