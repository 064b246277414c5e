//! Notes API Server
//!
//! Private notes for registered users. Every note has a unique slug and is
//! visible only to its author.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{apply_migrations, PostgresNoteRepository, PostgresUserRepository};
use app::{AccountService, NoteService};
use auth::ApiKeyIdentityProvider;
use config::Config;
use domain::ports::{IdentityProvider, NoteRepository, UserRepository};

/// Note service over whichever adapters the process was wired with
pub type DynNoteService = NoteService<dyn NoteRepository, dyn IdentityProvider>;

/// Account service over whichever user store the process was wired with
pub type DynAccountService = AccountService<dyn UserRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub note_service: Arc<DynNoteService>,
    pub account_service: Arc<DynAccountService>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the application router
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let mut signup_routes = Router::new().route(
        "/auth/signup/",
        get(handlers::signup_form).post(handlers::signup),
    );

    if state.config.signup_rate_limit {
        // 2 req/sec sustained, burst of 5, keyed by peer IP from connect info
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(2)
                .burst_size(5)
                .finish()
                .context("Failed to build governor config")?,
        );
        signup_routes = signup_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    // Anonymous requests to these are redirected to the login page
    let protected_routes = Router::new()
        .route("/notes/", get(handlers::list_notes))
        .route(
            "/add/",
            get(handlers::add_note_form).post(handlers::create_note),
        )
        .route("/done/", get(handlers::success))
        .route("/note/:slug/", get(handlers::note_detail))
        .route(
            "/edit/:slug/",
            get(handlers::edit_note_form).post(handlers::update_note),
        )
        .route(
            "/delete/:slug/",
            get(handlers::delete_note_confirm)
                .post(handlers::delete_note)
                .delete(handlers::delete_note),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::login_required,
        ));

    let mut app = Router::new()
        // Public pages
        .route("/health", get(health))
        .route("/", get(handlers::home))
        .route("/auth/login/", get(handlers::login))
        .route(
            "/auth/logout/",
            get(handlers::logout).post(handlers::logout),
        )
        .merge(signup_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http());

    if state.config.cors_allow_any {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    Ok(app.with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,notes_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Notes API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    apply_migrations(&db).await?;
    tracing::info!("Database ready");

    // Create adapters
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db.clone()));
    let notes: Arc<dyn NoteRepository> = Arc::new(PostgresNoteRepository::new(db.clone()));
    let identity: Arc<dyn IdentityProvider> = Arc::new(ApiKeyIdentityProvider::new(users.clone()));

    // Create app state
    let state = AppState {
        note_service: Arc::new(NoteService::new(notes, identity)),
        account_service: Arc::new(AccountService::new(users)),
        config: config.clone(),
    };

    let app = build_router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
