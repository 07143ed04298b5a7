//! Audit log read endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Duration, Utc};

use verify_engine::canonicalize;

use crate::error::ApiError;
use crate::models::DbLogEntry;
use crate::state::AppState;
use crate::store;

/// Usage history for a DL: non-alert entries with a vehicle association
/// inside the trailing 2-day window, most recent first.
pub async fn dl_usage(
    State(state): State<Arc<AppState>>,
    Path(dl_number): Path<String>,
) -> Result<Json<Vec<DbLogEntry>>, ApiError> {
    let dl_number = canonicalize(&dl_number);
    let since = Utc::now() - Duration::days(2);
    let logs = store::dl_usage_logs(&state.db, &dl_number, since).await?;
    Ok(Json(logs))
}

/// Full audit trail, most recent first.
pub async fn all_logs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DbLogEntry>>, ApiError> {
    let logs = store::all_logs(&state.db).await?;
    Ok(Json(logs))
}
