// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Outgoing message transport

use crate::error::TransportError;
use crate::telegram::{ChatId, MessageId};
use async_trait::async_trait;

/// Sends and deletes chat messages on behalf of the bot
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Send `text` to `chat_id`, returning the id of the sent message
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageId, TransportError>;

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError>;
}
