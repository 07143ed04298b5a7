//! Reference-store lookups and audit log persistence
//!
//! All queries run over the injected pool; the resolver performs one
//! case-insensitive exact lookup per document with no retries, and a store
//! failure propagates to the caller as a database error.

use checkpoint_types::{AuditLogEntry, DlData, RcData};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{DbLicense, DbLogEntry, DbRegistration};

/// Resolve a DL identifier to its status payload. `None` means the caller
/// had no identifier at all, which is a `no_data_provided` outcome rather
/// than an error.
pub async fn get_dl_data(pool: &SqlitePool, number: Option<&str>) -> sqlx::Result<DlData> {
    let Some(number) = number else {
        return Ok(DlData::no_data());
    };

    let license: Option<DbLicense> = sqlx::query_as(
        r#"
        SELECT dl_number, name, validity, phone_number, status
        FROM licenses
        WHERE dl_number = ?
        "#,
    )
    .bind(number)
    .fetch_optional(pool)
    .await?;

    Ok(match license {
        Some(license) => license.into_dl_data(),
        None => DlData::not_found(number),
    })
}

/// Resolve an RC identifier to its status payload.
pub async fn get_rc_data(pool: &SqlitePool, number: Option<&str>) -> sqlx::Result<RcData> {
    let Some(number) = number else {
        return Ok(RcData::no_data());
    };

    let registration: Option<DbRegistration> = sqlx::query_as(
        r#"
        SELECT regn_number, owner_name, vehicle_class, chassis_number,
               engine_number, valid_upto, status
        FROM registration_certificates
        WHERE regn_number = ?
        "#,
    )
    .bind(number)
    .fetch_optional(pool)
    .await?;

    Ok(match registration {
        Some(registration) => registration.into_rc_data(),
        None => RcData::not_found(number),
    })
}

/// Append one audit log entry. Entries are never updated or deleted.
pub async fn insert_log(pool: &SqlitePool, entry: &AuditLogEntry) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO logs (
            timestamp, scanned_by, location, tollgate,
            dl_number, dl_name, phone_number, dl_status,
            vehicle_number, owner_name, chassis_number, engine_number, rc_status,
            alert_type, description, suspicious
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.timestamp)
    .bind(entry.scanned_by.to_string())
    .bind(&entry.location)
    .bind(&entry.tollgate)
    .bind(&entry.dl_number)
    .bind(&entry.dl_name)
    .bind(&entry.phone_number)
    .bind(&entry.dl_status)
    .bind(&entry.vehicle_number)
    .bind(&entry.owner_name)
    .bind(&entry.chassis_number)
    .bind(&entry.engine_number)
    .bind(&entry.rc_status)
    .bind(&entry.alert_type)
    .bind(&entry.description)
    .bind(entry.suspicious)
    .execute(pool)
    .await?;

    Ok(())
}

/// Non-alert usage entries for a DL since `since`, most recent first.
/// Only entries that associate the DL with a vehicle qualify.
pub async fn dl_usage_logs(
    pool: &SqlitePool,
    dl_number: &str,
    since: DateTime<Utc>,
) -> sqlx::Result<Vec<DbLogEntry>> {
    sqlx::query_as(
        r#"
        SELECT * FROM logs
        WHERE dl_number = ? COLLATE NOCASE
          AND timestamp >= ?
          AND vehicle_number IS NOT NULL
          AND alert_type IS NULL
        ORDER BY timestamp DESC
        "#,
    )
    .bind(dl_number)
    .bind(since)
    .fetch_all(pool)
    .await
}

/// Full audit trail, most recent first.
pub async fn all_logs(pool: &SqlitePool) -> sqlx::Result<Vec<DbLogEntry>> {
    sqlx::query_as("SELECT * FROM logs ORDER BY timestamp DESC")
        .fetch_all(pool)
        .await
}
