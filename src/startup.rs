//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    AuthService, AuthServiceImpl, ChatService, ChatServiceImpl, MessageService,
    MessageServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::memory::MemoryStore;
use crate::infrastructure::repositories::{
    PgAuthTokenRepository, PgChatRepository, PgMessageRepository, PgUserRepository,
};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub chats: Arc<dyn ChatService>,
    pub messages: Arc<dyn MessageService>,
    /// Present when backed by PostgreSQL; used by readiness checks
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Services over PostgreSQL repositories
    pub fn postgres(pool: PgPool, settings: Arc<Settings>) -> Self {
        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let tokens = Arc::new(PgAuthTokenRepository::new(pool.clone()));
        let chats = Arc::new(PgChatRepository::new(pool.clone()));
        let messages = Arc::new(PgMessageRepository::new(pool.clone()));

        Self {
            auth: Arc::new(AuthServiceImpl::new(
                users.clone(),
                tokens,
                settings.auth.token_ttl(),
            )),
            chats: Arc::new(ChatServiceImpl::new(users, chats.clone())),
            messages: Arc::new(MessageServiceImpl::new(messages, chats)),
            db: Some(pool),
            settings,
        }
    }

    /// Services over a fresh process-local store
    pub fn in_memory(settings: Arc<Settings>) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), settings)
    }

    /// Services over an existing memory store, shared with the caller
    pub fn with_store(store: Arc<MemoryStore>, settings: Arc<Settings>) -> Self {
        Self {
            auth: Arc::new(AuthServiceImpl::new(
                store.clone(),
                store.clone(),
                settings.auth.token_ttl(),
            )),
            chats: Arc::new(ChatServiceImpl::new(store.clone(), store.clone())),
            messages: Arc::new(MessageServiceImpl::new(store.clone(), store)),
            db: None,
            settings,
        }
    }

    /// Build state for the configured backend, running migrations if asked
    pub async fn from_settings(settings: Arc<Settings>) -> Result<Self> {
        if settings.database.in_memory {
            tracing::warn!("Using in-memory store; data is lost on exit");
            return Ok(Self::in_memory(settings));
        }

        let pool = database::create_pool(&settings.database)
            .await
            .context("Failed to create database pool")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self::postgres(pool, settings))
    }
}

/// Full router with tracing and CORS applied
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let settings = Arc::new(settings);
        let state = AppState::from_settings(settings.clone()).await?;

        handlers::health::init_server_start();
        let router = build_router(state);

        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
