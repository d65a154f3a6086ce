// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Health check endpoint

pub const STATE_OK: &str = "all is working";

/// Liveness check; answers as long as the server accepts requests
pub async fn state() -> &'static str {
    STATE_OK
}
