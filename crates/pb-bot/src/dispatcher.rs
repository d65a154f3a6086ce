// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Routes incoming updates to command handlers and sends the replies

use crate::commands::{messages, split_command, Command, CredentialsHandler};
use crate::error::CommandError;
use crate::telegram::{ChatId, MessageId, Update};
use crate::transport::MessageTransport;
use pb_logging::correlation_id;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, info_span, warn, Instrument};

/// How long messages carrying secrets stay visible in the chat
pub const DEFAULT_SECRET_TTL: Duration = Duration::from_secs(10);

/// Update dispatcher.
///
/// Each update is handled on its own task, so a slow store call for one user
/// never delays replies to another. Those tasks and the pending deletions are
/// tracked so shutdown can wait for them.
pub struct Dispatcher {
    handler: CredentialsHandler,
    transport: Arc<dyn MessageTransport>,
    secret_ttl: Duration,
    tasks: TaskTracker,
}

impl Dispatcher {
    pub fn new(handler: CredentialsHandler, transport: Arc<dyn MessageTransport>) -> Self {
        Self {
            handler,
            transport,
            secret_ttl: DEFAULT_SECRET_TTL,
            tasks: TaskTracker::new(),
        }
    }

    pub fn with_secret_ttl(mut self, secret_ttl: Duration) -> Self {
        self.secret_ttl = secret_ttl;
        self
    }

    /// Consume updates until every sender is dropped, then wait for the
    /// in-flight updates and every scheduled deletion to finish
    pub async fn run(self: Arc<Self>, mut updates: mpsc::Receiver<Update>) {
        info!("Dispatcher started");
        while let Some(update) = updates.recv().await {
            let dispatcher = Arc::clone(&self);
            self.tasks
                .spawn(async move { dispatcher.handle_update(update).await });
        }

        self.tasks.close();
        info!(
            pending = self.tasks.len(),
            "Update stream closed, waiting for pending tasks"
        );
        self.tasks.wait().await;
        info!("Dispatcher stopped");
    }

    /// Handle a single update to completion.
    ///
    /// Updates without a message, a sender or text are ignored.
    pub async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            debug!(update_id = update.update_id, "skipping update without message");
            return;
        };
        let (Some(user), Some(text)) = (message.from.as_ref(), message.text.as_deref()) else {
            debug!(update_id = update.update_id, "skipping message without sender or text");
            return;
        };

        let chat_id = message.chat.id;
        let (token, args) = split_command(text);
        let span = info_span!(
            "update",
            correlation_id = %correlation_id(),
            update_id = update.update_id,
            user_id = user.id,
            command = token
        );

        async {
            let Some(command) = Command::parse(token) else {
                debug!("unknown command");
                self.reply(chat_id, messages::UNKNOWN_COMMAND).await;
                return;
            };

            match self.handler.handle(command, user.id, args).await {
                Ok(text) => {
                    if command == Command::Set {
                        self.delete_later(chat_id, message.message_id);
                    }
                    let sent = self.reply(chat_id, &text).await;
                    if let (Command::Get, Some(sent_id)) = (command, sent) {
                        self.delete_later(chat_id, sent_id);
                    }
                }
                Err(err @ CommandError::Usage(_)) => {
                    debug!("usage error");
                    self.reply(chat_id, err.user_message()).await;
                }
                Err(err @ CommandError::Handler { .. }) => {
                    warn!(error = %err, "command failed");
                    self.reply(chat_id, err.user_message()).await;
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn reply(&self, chat_id: ChatId, text: &str) -> Option<MessageId> {
        match self.transport.send_text(chat_id, text).await {
            Ok(message_id) => Some(message_id),
            Err(err) => {
                warn!(chat_id, error = %err, "failed to send reply");
                None
            }
        }
    }

    /// Delete a message once the secret TTL elapses, without waiting for it
    fn delete_later(&self, chat_id: ChatId, message_id: MessageId) {
        let transport = Arc::clone(&self.transport);
        let ttl = self.secret_ttl;
        self.tasks.spawn(
            async move {
                tokio::time::sleep(ttl).await;
                if let Err(err) = transport.delete_message(chat_id, message_id).await {
                    warn!(chat_id, message_id, error = %err, "failed to delete message");
                }
            }
            .in_current_span(),
        );
    }
}
