//! Blacklist management endpoints
//!
//! These mutate the stored `status` of reference records between `valid`
//! and `blacklisted`; the verification pipeline itself only ever reads it.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use checkpoint_types::DocumentKind;
use verify_engine::canonicalize;

use crate::error::ApiError;
use crate::models::{BlacklistRequest, DbLicense, DbRegistration, PageParams, Paginated};
use crate::state::AppState;

/// Paginated listing of blacklisted driving licenses.
pub async fn list_blacklisted_dl(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<DbLicense>>, ApiError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM licenses WHERE status = 'blacklisted'")
        .fetch_one(&state.db)
        .await?;

    let data: Vec<DbLicense> = sqlx::query_as(
        r#"
        SELECT dl_number, name, validity, phone_number, status
        FROM licenses
        WHERE status = 'blacklisted'
        ORDER BY dl_number
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(params.limit)
    .bind(params.offset())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(Paginated::new(data, total, params)))
}

/// Paginated listing of blacklisted registration certificates.
pub async fn list_blacklisted_rc(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<DbRegistration>>, ApiError> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM registration_certificates WHERE status = 'blacklisted'",
    )
    .fetch_one(&state.db)
    .await?;

    let data: Vec<DbRegistration> = sqlx::query_as(
        r#"
        SELECT regn_number, owner_name, vehicle_class, chassis_number,
               engine_number, valid_upto, status
        FROM registration_certificates
        WHERE status = 'blacklisted'
        ORDER BY regn_number
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(params.limit)
    .bind(params.offset())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(Paginated::new(data, total, params)))
}

/// Add an existing DL or RC record to the blacklist.
pub async fn add_to_blacklist(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BlacklistRequest>,
) -> Result<Json<Value>, ApiError> {
    let number = canonicalize(&req.number);
    if number.is_empty() {
        return Err(ApiError::InvalidRequest("number is required".to_string()));
    }

    let updated = set_status(&state.db, req.kind, &number, "blacklisted").await?;
    if !updated {
        return Err(ApiError::NotFound(format!("{} {}", req.kind, number)));
    }

    tracing::info!("{} {} added to blacklist", req.kind, number);
    Ok(Json(json!({
        "message": format!("{} {} added to blacklist", req.kind, number)
    })))
}

/// Remove a record from the blacklist (mark it valid again).
pub async fn mark_valid(
    State(state): State<Arc<AppState>>,
    Path((kind, number)): Path<(DocumentKind, String)>,
) -> Result<Json<Value>, ApiError> {
    let number = canonicalize(&number);

    let updated = set_status(&state.db, kind, &number, "valid").await?;
    if !updated {
        return Err(ApiError::NotFound(format!("{} {}", kind, number)));
    }

    tracing::info!("{} {} marked as valid", kind, number);
    Ok(Json(json!({
        "message": format!("{} {} marked as valid", kind, number)
    })))
}

async fn set_status(
    pool: &sqlx::SqlitePool,
    kind: DocumentKind,
    number: &str,
    status: &str,
) -> sqlx::Result<bool> {
    let query = match kind {
        DocumentKind::Dl => "UPDATE licenses SET status = ? WHERE dl_number = ?",
        DocumentKind::Rc => {
            "UPDATE registration_certificates SET status = ? WHERE regn_number = ?"
        }
    };

    let result = sqlx::query(query)
        .bind(status)
        .bind(number)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
