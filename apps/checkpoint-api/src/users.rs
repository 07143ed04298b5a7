//! Operator account and session endpoints
//!
//! External to the verification pipeline itself; checkpoints authenticate
//! operators before they can run verifications. Passwords are stored as
//! SHA-256 digests.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateUserRequest, DbUser, LoginRequest, LoginResponse, UserResponse};
use crate::state::AppState;

fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn role_label(role: &str) -> &'static str {
    match role {
        "superadmin" => "Super Admin",
        "admin" => "Admin",
        _ => "Toll Operator",
    }
}

/// Log an operator in and mark the account active.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user: Option<DbUser> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    let user = match user {
        Some(user) if user.password_hash == hash_password(&req.password) => user,
        _ => return Err(ApiError::InvalidCredentials),
    };

    sqlx::query(
        "UPDATE users SET is_active = 1, login_time = ?, logout_time = NULL WHERE id = ?",
    )
    .bind(Utc::now())
    .bind(&user.id)
    .execute(&state.db)
    .await?;

    tracing::info!("User {} logged in", user.email);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: user.id,
        role_label: role_label(&user.role).to_string(),
        role: user.role,
        name: user.name,
    }))
}

/// Log an operator out and mark the account inactive.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = sqlx::query("UPDATE users SET is_active = 0, logout_time = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(&user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("User".to_string()));
    }

    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// List all operator accounts (without credential material).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users: Vec<DbUser> = sqlx::query_as("SELECT * FROM users ORDER BY created_at")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a new operator account. New accounts start inactive until their
/// first login.
pub async fn add_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.password.is_empty()
        || req.role.trim().is_empty()
    {
        return Err(ApiError::InvalidRequest(
            "All fields are required: name, email, password, role".to_string(),
        ));
    }

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::DuplicateUser);
    }

    let user_id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, is_active, created_at)
        VALUES (?, ?, ?, ?, ?, 0, ?)
        "#,
    )
    .bind(&user_id)
    .bind(&req.name)
    .bind(&req.email)
    .bind(hash_password(&req.password))
    .bind(&req.role)
    .bind(Utc::now())
    .execute(&state.db)
    .await?;

    tracing::info!("Created user {} ({})", req.email, req.role);

    Ok(Json(json!({
        "message": "User added successfully",
        "user_id": user_id,
    })))
}

/// Delete an operator account. The last superadmin is protected so the
/// system cannot lock itself out.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user: Option<DbUser> = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(&user_id)
        .fetch_optional(&state.db)
        .await?;

    let user = user.ok_or_else(|| ApiError::NotFound("User".to_string()))?;

    if user.role == "superadmin" {
        let superadmins: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'superadmin'")
                .fetch_one(&state.db)
                .await?;
        if superadmins <= 1 {
            return Err(ApiError::LastSuperadmin);
        }
    }

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&user_id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
