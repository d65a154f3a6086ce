// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Server state management

use crate::telegram::Update;
use tokio::sync::mpsc;

/// Number of accepted updates that may wait for the dispatcher
pub const UPDATE_QUEUE_CAPACITY: usize = 100;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    /// Hands accepted updates to the dispatcher
    pub updates: mpsc::Sender<Update>,
}

impl AppState {
    pub fn new(updates: mpsc::Sender<Update>) -> Self {
        Self { updates }
    }

    /// Create state together with the receiving end of its update queue
    pub fn with_queue(capacity: usize) -> (Self, mpsc::Receiver<Update>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}
