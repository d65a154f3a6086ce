// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Main server implementation

use crate::commands::CredentialsHandler;
use crate::config::BotConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{BotError, BotResult};
use crate::handlers;
use crate::state::{AppState, UPDATE_QUEUE_CAPACITY};
use crate::telegram::{TelegramClient, Update};
use axum::{
    routing::{get, post},
    Router,
};
use pb_credentials::{open_store, CredentialStore};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Webhook server driving the bot
pub struct BotServer {
    config: BotConfig,
    app: Router,
    telegram: TelegramClient,
    dispatcher: Arc<Dispatcher>,
    updates: mpsc::Receiver<Update>,
}

impl BotServer {
    /// Validate the configuration, open the store and build the Bot API client
    pub async fn new(config: BotConfig) -> BotResult<Self> {
        config.validate()?;
        let store = open_store(&config.storage).await?;
        let telegram = TelegramClient::new(&config.api_url, &config.token)?;
        Ok(Self::with_parts(config, store, telegram))
    }

    /// Construct a server from an already-opened store and client
    pub fn with_parts(
        config: BotConfig,
        store: Arc<dyn CredentialStore>,
        telegram: TelegramClient,
    ) -> Self {
        let (state, updates) = AppState::with_queue(UPDATE_QUEUE_CAPACITY);
        let dispatcher = Dispatcher::new(CredentialsHandler::new(store), Arc::new(telegram.clone()))
            .with_secret_ttl(config.secret_ttl());

        Self {
            config,
            app: Self::build_app(state),
            telegram,
            dispatcher: Arc::new(dispatcher),
            updates,
        }
    }

    /// Build the Axum application with routes and middleware
    pub fn build_app(state: AppState) -> Router {
        Router::new()
            .route("/", post(handlers::webhook::receive_update))
            .route("/state", get(handlers::health::state))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl-C
    pub async fn run(self) -> BotResult<()> {
        let addr = self.config.bind_addr();
        info!("Starting server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Register with the Bot API, then serve webhook requests on `listener`
    /// until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> BotResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let me = self.telegram.get_me().await?;
        info!(
            bot_id = me.id,
            username = me.username.as_deref().unwrap_or(""),
            "Authorized on Bot API"
        );

        match self.config.webhook_url() {
            Some(url) => {
                self.telegram.set_webhook(url).await?;
                info!(url, "Webhook registered");
            }
            None => warn!("server.host is empty, webhook not registered"),
        }

        let dispatcher = tokio::spawn(self.dispatcher.run(self.updates));

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| BotError::Server(format!("webhook server error: {err}")))?;

        // The router owned the last update sender; the dispatcher drains the queue
        // and waits out pending deletions before exiting
        dispatcher
            .await
            .map_err(|err| BotError::Server(format!("dispatcher task failed: {err}")))?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
