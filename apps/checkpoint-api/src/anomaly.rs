//! Suspicious DL usage detection
//!
//! A single license seen with three or more distinct vehicles inside a
//! trailing two-day window is suspicious. The check re-runs on every
//! qualifying verification and re-logs an alert each time the threshold is
//! met; there is deliberately no suppression of repeated alerts.

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use checkpoint_types::AuditLogEntry;

use crate::store;

/// How far back the usage window reaches.
const WINDOW_DAYS: i64 = 2;

/// Distinct vehicles within the window at which usage becomes suspicious.
const VEHICLE_THRESHOLD: usize = 3;

/// Check a DL for suspicious multi-vehicle usage as of `as_of`.
///
/// Counts distinct vehicle numbers across non-alert log entries for the
/// license with timestamps inside `[as_of - 2 days, as_of]` (both bounds
/// inclusive). At the threshold, one alert entry is written and `true`
/// returned; below it nothing is written.
pub async fn check_suspicious(
    pool: &SqlitePool,
    dl_number: &str,
    as_of: DateTime<Utc>,
    location: &str,
    tollgate: &str,
) -> sqlx::Result<bool> {
    let since = as_of - Duration::days(WINDOW_DAYS);

    // Alert entries carry no vehicle, but the alert_type filter keeps the
    // exclusion explicit rather than incidental.
    let vehicles: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT DISTINCT vehicle_number FROM logs
        WHERE dl_number = ?
          AND timestamp >= ?
          AND timestamp <= ?
          AND vehicle_number IS NOT NULL
          AND alert_type IS NULL
        "#,
    )
    .bind(dl_number)
    .bind(since)
    .bind(as_of)
    .fetch_all(pool)
    .await?;

    if vehicles.len() < VEHICLE_THRESHOLD {
        return Ok(false);
    }

    tracing::warn!(
        "Suspicious DL usage: {} seen with {} vehicles in last {} days",
        dl_number,
        vehicles.len(),
        WINDOW_DAYS
    );

    let alert = AuditLogEntry::suspicious_dl_alert(dl_number, vehicles.len(), location, tollgate);
    store::insert_log(pool, &alert).await?;

    Ok(true)
}
