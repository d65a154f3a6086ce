// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only
#![allow(dead_code)]

//! Shared fixtures: a recording transport and a fake Bot API server

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use pb_bot::telegram::{Chat, ChatId, Message, MessageId, Update, User};
use pb_bot::{MessageTransport, TransportError};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const TEST_TOKEN: &str = "test-token";

/// Message id the fake Bot API refuses to delete
pub const UNDELETABLE_MESSAGE_ID: MessageId = 404;

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub text: String,
}

/// Transport that records everything instead of talking to the Bot API
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    deleted: Mutex<Vec<(ChatId, MessageId)>>,
    next_id: AtomicI64,
    fail_sends: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1000),
            ..Default::default()
        })
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|message| message.text).collect()
    }

    pub fn deleted(&self) -> Vec<(ChatId, MessageId)> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageId, TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Api {
                method: "sendMessage".to_string(),
                description: "Forbidden: bot was blocked by the user".to_string(),
            });
        }
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(message_id)
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        self.deleted.lock().unwrap().push((chat_id, message_id));
        Ok(())
    }
}

/// Build an update carrying a text message from `user_id` in their private chat
pub fn text_update(update_id: i64, user_id: i64, message_id: MessageId, text: &str) -> Update {
    Update {
        update_id,
        message: Some(Message {
            message_id,
            from: Some(User {
                id: user_id,
                is_bot: false,
                first_name: format!("user{}", user_id),
                username: None,
            }),
            chat: Chat { id: user_id },
            text: Some(text.to_string()),
        }),
    }
}

/// Poll `condition` until it holds or `timeout` elapses
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() > deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: String,
    pub body: Value,
}

#[derive(Clone, Default)]
struct FakeApiState {
    calls: Arc<Mutex<Vec<ApiCall>>>,
    next_message_id: Arc<AtomicI64>,
}

/// Minimal Bot API served on an ephemeral local port
pub struct FakeBotApi {
    pub base_url: String,
    calls: Arc<Mutex<Vec<ApiCall>>>,
    handle: JoinHandle<()>,
}

impl FakeBotApi {
    pub async fn spawn() -> Self {
        let state = FakeApiState {
            next_message_id: Arc::new(AtomicI64::new(500)),
            ..Default::default()
        };
        let calls = Arc::clone(&state.calls);

        let app = Router::new()
            .route("/:bot/:method", post(fake_method))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake Bot API");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake Bot API");
        });

        Self {
            base_url: format!("http://{}", addr),
            calls,
            handle,
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .map(|call| call.body)
            .collect()
    }
}

impl Drop for FakeBotApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn fake_method(
    State(state): State<FakeApiState>,
    Path((bot, method)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if bot != format!("bot{}", TEST_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error_code": 401, "description": "Unauthorized"})),
        );
    }

    state.calls.lock().unwrap().push(ApiCall {
        method: method.clone(),
        body: body.clone(),
    });

    match method.as_str() {
        "getMe" => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "result": {"id": 1, "is_bot": true, "first_name": "Passbot", "username": "passbot"}
            })),
        ),
        "setWebhook" => (
            StatusCode::OK,
            Json(json!({"ok": true, "result": true, "description": "Webhook was set"})),
        ),
        "sendMessage" => {
            let message_id = state.next_message_id.fetch_add(1, Ordering::SeqCst);
            (
                StatusCode::OK,
                Json(json!({
                    "ok": true,
                    "result": {
                        "message_id": message_id,
                        "date": 1700000000,
                        "chat": {"id": body["chat_id"], "type": "private"},
                        "text": body["text"]
                    }
                })),
            )
        }
        "deleteMessage" if body["message_id"] == UNDELETABLE_MESSAGE_ID => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: message to delete not found"
            })),
        ),
        "deleteMessage" => (StatusCode::OK, Json(json!({"ok": true, "result": true}))),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"ok": false, "error_code": 404, "description": "Not Found"})),
        ),
    }
}
