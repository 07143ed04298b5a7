//! Verification orchestrator
//!
//! One request verifies a DL and/or an RC: OCR images and manual numbers
//! come in, an authoritative identifier is chosen per document (manual
//! entry wins over OCR), each side is resolved independently against the
//! reference store, a consolidated audit entry is written, and the DL is
//! checked for suspicious multi-vehicle reuse.

use std::io::Write;
use std::sync::Arc;

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use tempfile::NamedTempFile;

use checkpoint_types::{AuditLogEntry, ScanSource};
use verify_engine::canonicalize;

use crate::anomaly;
use crate::error::ApiError;
use crate::models::{VerifyRequest, VerifyResponse};
use crate::state::AppState;
use crate::store;

/// Combined DL/RC verification endpoint.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    if !req.has_document_input() {
        return Err(ApiError::InvalidRequest(
            "At least one of dl_image_base64, rc_image_base64, dl_number, rc_number is required"
                .to_string(),
        ));
    }

    let ocr_scan = req.dl_image_base64.is_some() || req.rc_image_base64.is_some();

    // Temp images live in this scope only; NamedTempFile removes them on
    // drop, so every exit path below cleans up, including errors.
    let mut dl_from_ocr = None;
    if let Some(b64) = req.dl_image_base64.as_deref() {
        let image = write_temp_image(b64)?;
        dl_from_ocr = state.dl_extractor.extract_identifier(image.path()).await;
    }

    let mut rc_from_ocr = None;
    if let Some(b64) = req.rc_image_base64.as_deref() {
        let image = write_temp_image(b64)?;
        rc_from_ocr = state.rc_extractor.extract_identifier(image.path()).await;
    }

    // Manual entry is authoritative; OCR only fills the gap.
    let final_dl = pick_identifier(req.dl_number.as_deref(), dl_from_ocr);
    let final_rc = pick_identifier(req.rc_number.as_deref(), rc_from_ocr);

    // Each side resolves independently; a missing identifier on one side
    // never blocks the other.
    let dl_data = store::get_dl_data(&state.db, final_dl.as_deref()).await?;
    let rc_data = store::get_rc_data(&state.db, final_rc.as_deref()).await?;

    // Consolidated audit entry for this transaction; persisted only when at
    // least one document side carried data. A failed write is reported but
    // never invalidates the computed result.
    let source = if ocr_scan {
        ScanSource::Ocr
    } else {
        ScanSource::Manual
    };
    let mut entry = AuditLogEntry::new(source, &req.location, &req.tollgate);
    entry.record_dl(&dl_data);
    entry.record_rc(&rc_data);

    if entry.has_document_data() {
        if let Err(e) = store::insert_log(&state.db, &entry).await {
            tracing::warn!("Failed to write audit log entry: {}", e);
        }
    } else {
        tracing::warn!("No valid DL or RC data to log for this transaction");
    }

    // Anomaly check only makes sense for a DL that exists in the store.
    let mut suspicious = false;
    if dl_data.status.is_resolved() {
        if let Some(dl_number) = &dl_data.license_number {
            suspicious = anomaly::check_suspicious(
                &state.db,
                dl_number,
                Utc::now(),
                &req.location,
                &req.tollgate,
            )
            .await?;
        }
    }

    Ok(Json(VerifyResponse {
        dl_data,
        rc_data,
        suspicious,
    }))
}

/// Manual input (cleaned) if non-empty, else the OCR candidate.
fn pick_identifier(manual: Option<&str>, from_ocr: Option<String>) -> Option<String> {
    match manual {
        Some(raw) if !raw.trim().is_empty() => {
            let cleaned = canonicalize(raw);
            (!cleaned.is_empty()).then_some(cleaned)
        }
        _ => from_ocr,
    }
}

/// Decode a base64 image into a self-deleting temp file for the OCR engines.
fn write_temp_image(b64: &str) -> Result<NamedTempFile, ApiError> {
    let bytes = BASE64
        .decode(b64)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid image base64: {}", e)))?;

    let mut file = NamedTempFile::new().map_err(|e| ApiError::Internal(e.into()))?;
    file.write_all(&bytes)
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_input_takes_precedence_over_ocr() {
        let picked = pick_identifier(
            Some("mh12 dv12345 67890 12"),
            Some("KA0198765432109".to_string()),
        );
        assert_eq!(picked.as_deref(), Some("MH12DV123456789012"));
    }

    #[test]
    fn blank_manual_input_falls_back_to_ocr() {
        let picked = pick_identifier(Some("   "), Some("KA0198765432109".to_string()));
        assert_eq!(picked.as_deref(), Some("KA0198765432109"));
        assert_eq!(pick_identifier(None, None), None);
    }

    #[test]
    fn temp_image_is_removed_when_guard_drops() {
        let path = {
            let file = write_temp_image(&BASE64.encode(b"fake image bytes")).unwrap();
            assert!(file.path().exists());
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
