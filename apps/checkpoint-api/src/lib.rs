//! Checkpoint API - toll checkpoint document verification backend
//!
//! Provides REST endpoints for:
//! - Combined DL/RC verification (image OCR and manual entry)
//! - DL usage history and audit logs
//! - Blacklist management
//! - Operator account management

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod anomaly;
pub mod blacklist;
pub mod error;
pub mod logs;
pub mod models;
pub mod ocr;
pub mod state;
pub mod store;
pub mod users;
pub mod verify;

pub use state::AppState;

/// Build the application router over a shared state.
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for the checkpoint web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health))
        // Verification pipeline
        .route("/api/verify", post(verify::verify))
        // Audit log reads
        .route("/api/dl-usage/:dl_number", get(logs::dl_usage))
        .route("/api/logs", get(logs::all_logs))
        // Blacklist management
        .route("/api/blacklist/dl", get(blacklist::list_blacklisted_dl))
        .route("/api/blacklist/rc", get(blacklist::list_blacklisted_rc))
        .route("/api/blacklist", post(blacklist::add_to_blacklist))
        .route("/api/blacklist/:kind/:number", put(blacklist::mark_valid))
        // Operator accounts
        .route("/login", post(users::login))
        .route("/api/logout/:user_id", post(users::logout))
        .route("/api/users", get(users::list_users).post(users::add_user))
        .route("/api/users/:user_id", delete(users::delete_user))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}
