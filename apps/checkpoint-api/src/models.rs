//! Request/response models and database row types

use checkpoint_types::{DlData, DocumentKind, DocumentStatus, RcData};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

fn unknown() -> String {
    "unknown".to_string()
}

/// One verification request. Images arrive as base64 so the endpoint stays
/// plain JSON; at least one of the four document-bearing fields must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub dl_image_base64: Option<String>,
    #[serde(default)]
    pub rc_image_base64: Option<String>,
    #[serde(default)]
    pub dl_number: Option<String>,
    #[serde(default)]
    pub rc_number: Option<String>,
    #[serde(default = "unknown")]
    pub location: String,
    #[serde(default = "unknown")]
    pub tollgate: String,
}

impl VerifyRequest {
    pub fn has_document_input(&self) -> bool {
        let non_blank = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        non_blank(&self.dl_image_base64)
            || non_blank(&self.rc_image_base64)
            || non_blank(&self.dl_number)
            || non_blank(&self.rc_number)
    }
}

/// Combined verification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub dl_data: DlData,
    pub rc_data: RcData,
    pub suspicious: bool,
}

/// Driving license reference record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DbLicense {
    pub dl_number: String,
    pub name: Option<String>,
    pub validity: Option<String>,
    pub phone_number: Option<String>,
    pub status: String,
}

impl DbLicense {
    pub fn into_dl_data(self) -> DlData {
        DlData {
            status: DocumentStatus::from_stored(&self.status),
            license_number: Some(self.dl_number),
            name: self.name,
            validity: self.validity,
            phone_number: self.phone_number,
        }
    }
}

/// Registration certificate reference record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DbRegistration {
    pub regn_number: String,
    pub owner_name: Option<String>,
    pub vehicle_class: Option<String>,
    pub chassis_number: Option<String>,
    pub engine_number: Option<String>,
    pub valid_upto: Option<String>,
    pub status: String,
}

impl DbRegistration {
    pub fn into_rc_data(self) -> RcData {
        RcData {
            status: DocumentStatus::from_stored(&self.status),
            regn_number: Some(self.regn_number),
            owner_name: self.owner_name,
            vehicle_class: self.vehicle_class,
            chassis_number: self.chassis_number,
            engine_number: self.engine_number,
            valid_upto: self.valid_upto,
        }
    }
}

/// Audit log row as stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DbLogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub scanned_by: String,
    pub location: String,
    pub tollgate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dl_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dl_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dl_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chassis_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicious: Option<bool>,
}

/// Operator account row.
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub login_time: Option<DateTime<Utc>>,
    pub logout_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Public view of an operator account (no credential material).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub login_time: Option<DateTime<Utc>>,
    pub logout_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<DbUser> for UserResponse {
    fn from(u: DbUser) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            is_active: u.is_active,
            login_time: u.login_time,
            logout_time: u.logout_time,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: String,
    pub role: String,
    pub role_label: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlacklistRequest {
    pub kind: DocumentKind,
    pub number: String,
}

/// Pagination parameters for blacklist listings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    50
}

impl PageParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit
    }
}

/// Paginated listing wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, params: PageParams) -> Self {
        let pages = if params.limit > 0 {
            (total + params.limit - 1) / params.limit
        } else {
            0
        };
        Self {
            data,
            total,
            page: params.page,
            pages,
        }
    }
}
