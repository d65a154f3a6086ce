// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Bot API HTTP client

use super::types::{
    ApiResponse, ChatId, DeleteMessageRequest, Message, MessageId, ReplyKeyboardMarkup,
    SendMessageRequest, SetWebhookRequest, User,
};
use crate::error::TransportError;
use crate::transport::MessageTransport;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Bot API methods the bot uses.
///
/// Every outgoing text message carries the reply keyboard configured on the
/// client.
#[derive(Clone)]
pub struct TelegramClient {
    http_client: HttpClient,
    base_url: Url,
    token: String,
    keyboard: Option<ReplyKeyboardMarkup>,
}

impl TelegramClient {
    /// Create a client for `api_url` authenticated with the bot `token`
    pub fn new(api_url: &str, token: &str) -> Result<Self, TransportError> {
        let base_url =
            Url::parse(api_url).map_err(|err| TransportError::Url(format!("{api_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::Url(format!("{api_url}: not a base URL")));
        }

        let http_client = HttpClient::builder()
            .user_agent(concat!("passbot/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            token: token.to_string(),
            keyboard: Some(ReplyKeyboardMarkup::help()),
        })
    }

    /// Replace the keyboard attached to sent messages
    pub fn with_keyboard(mut self, keyboard: Option<ReplyKeyboardMarkup>) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Identity of the bot; doubles as a token check
    pub async fn get_me(&self) -> Result<User, TransportError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Point the Bot API at our webhook URL
    pub async fn set_webhook(&self, url: &str) -> Result<bool, TransportError> {
        self.call("setWebhook", &SetWebhookRequest { url }).await
    }

    pub async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<Message, TransportError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup: self.keyboard.as_ref(),
        };
        self.call("sendMessage", &request).await
    }

    pub async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<bool, TransportError> {
        self.call(
            "deleteMessage",
            &DeleteMessageRequest {
                chat_id,
                message_id,
            },
        )
        .await
    }

    fn method_url(&self, method: &str) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Url(format!("{}: not a base URL", self.base_url)))?
            .pop_if_empty()
            .push(&format!("bot{}", self.token))
            .push(method);
        Ok(url)
    }

    async fn call<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let url = self.method_url(method)?;
        debug!(method, "calling Bot API");

        let response = self.http_client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Failed calls still answer with the JSON envelope
        let envelope: ApiResponse<T> = serde_json::from_str(&text)
            .map_err(|_| TransportError::UnexpectedResponse { status, body: text })?;

        if !envelope.ok {
            return Err(TransportError::Api {
                method: method.to_string(),
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        envelope
            .result
            .ok_or_else(|| TransportError::MissingResult(method.to_string()))
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .field("keyboard", &self.keyboard)
            .finish()
    }
}

#[async_trait]
impl MessageTransport for TelegramClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageId, TransportError> {
        let message = self.send_message(chat_id, text).await?;
        Ok(message.message_id)
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        if TelegramClient::delete_message(self, chat_id, message_id).await? {
            Ok(())
        } else {
            Err(TransportError::Api {
                method: "deleteMessage".to_string(),
                description: "message was not deleted".to_string(),
            })
        }
    }
}
