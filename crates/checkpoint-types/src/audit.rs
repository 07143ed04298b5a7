//! Append-only audit log entries for verification transactions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{DlData, RcData};

/// How the document numbers in a transaction were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanSource {
    #[serde(rename = "OCR")]
    Ocr,
    Manual,
    /// Entries written by the anomaly detector itself.
    System,
}

impl std::fmt::Display for ScanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanSource::Ocr => write!(f, "OCR"),
            ScanSource::Manual => write!(f, "Manual"),
            ScanSource::System => write!(f, "System"),
        }
    }
}

/// One consolidated audit record for a verification transaction.
///
/// Entries carrying `alert_type` are alert entries raised by the anomaly
/// detector; they are excluded from usage-window queries so alerts never
/// count as vehicle usage themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: DateTime<Utc>,
    pub scanned_by: ScanSource,
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

impl AuditLogEntry {
    /// Start an empty entry for the current transaction.
    pub fn new(
        scanned_by: ScanSource,
        location: impl Into<String>,
        tollgate: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            scanned_by,
            location: location.into(),
            tollgate: tollgate.into(),
            dl_number: None,
            dl_name: None,
            phone_number: None,
            dl_status: None,
            vehicle_number: None,
            owner_name: None,
            chassis_number: None,
            engine_number: None,
            rc_status: None,
            alert_type: None,
            description: None,
            suspicious: None,
        }
    }

    /// Record the resolved DL payload. No-op when nothing was resolved
    /// (`no_data_provided` carries no identifier).
    pub fn record_dl(&mut self, dl: &DlData) {
        if let Some(number) = &dl.license_number {
            self.dl_number = Some(number.clone());
            self.dl_name = dl.name.clone();
            self.phone_number = dl.phone_number.clone();
            self.dl_status = Some(dl.status.to_string());
        }
    }

    /// Record the resolved RC payload, keyed by vehicle number.
    pub fn record_rc(&mut self, rc: &RcData) {
        if let Some(number) = &rc.regn_number {
            self.vehicle_number = Some(number.clone());
            self.owner_name = rc.owner_name.clone();
            self.chassis_number = rc.chassis_number.clone();
            self.engine_number = rc.engine_number.clone();
            self.rc_status = Some(rc.status.to_string());
        }
    }

    /// Build a suspicious-usage alert entry for a DL seen with
    /// `vehicle_count` distinct vehicles inside the trailing window.
    pub fn suspicious_dl_alert(
        dl_number: impl Into<String>,
        vehicle_count: usize,
        location: impl Into<String>,
        tollgate: impl Into<String>,
    ) -> Self {
        let dl_number = dl_number.into();
        let mut entry = Self::new(ScanSource::System, location, tollgate);
        entry.description = Some(format!(
            "DL {} used with {} vehicles in last 2 days",
            dl_number, vehicle_count
        ));
        entry.dl_number = Some(dl_number);
        entry.alert_type = Some("Suspicious DL Usage".to_string());
        entry.suspicious = Some(true);
        entry
    }

    /// An entry is only worth persisting when at least one document side
    /// carried data.
    pub fn has_document_data(&self) -> bool {
        self.dl_number.is_some() || self.vehicle_number.is_some()
    }

    /// Alert entries are distinguished by the presence of `alert_type`.
    pub fn is_alert(&self) -> bool {
        self.alert_type.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    #[test]
    fn empty_entry_has_no_document_data() {
        let entry = AuditLogEntry::new(ScanSource::Manual, "NH-44", "TG-01");
        assert!(!entry.has_document_data());
        assert!(!entry.is_alert());
    }

    #[test]
    fn recording_a_resolved_dl_populates_entry() {
        let mut entry = AuditLogEntry::new(ScanSource::Ocr, "NH-44", "TG-01");
        let dl = DlData {
            status: DocumentStatus::Blacklisted,
            license_number: Some("MH12AB12345678901".to_string()),
            name: Some("A. Driver".to_string()),
            validity: None,
            phone_number: None,
        };
        entry.record_dl(&dl);
        assert!(entry.has_document_data());
        assert_eq!(entry.dl_status.as_deref(), Some("blacklisted"));
        assert_eq!(entry.dl_number.as_deref(), Some("MH12AB12345678901"));
    }

    #[test]
    fn no_data_payload_leaves_entry_empty() {
        let mut entry = AuditLogEntry::new(ScanSource::Manual, "NH-44", "TG-01");
        entry.record_dl(&DlData::no_data());
        entry.record_rc(&RcData::no_data());
        assert!(!entry.has_document_data());
    }

    #[test]
    fn not_found_still_counts_as_document_data() {
        let mut entry = AuditLogEntry::new(ScanSource::Manual, "NH-44", "TG-01");
        entry.record_rc(&RcData::not_found("KA01AB1234"));
        assert!(entry.has_document_data());
        assert_eq!(entry.rc_status.as_deref(), Some("not_found"));
    }

    #[test]
    fn alert_entries_are_marked_system_and_suspicious() {
        let entry =
            AuditLogEntry::suspicious_dl_alert("MH12AB12345678901", 3, "NH-44", "TG-01");
        assert!(entry.is_alert());
        assert_eq!(entry.scanned_by, ScanSource::System);
        assert_eq!(entry.suspicious, Some(true));
        assert!(entry
            .description
            .as_deref()
            .unwrap()
            .contains("3 vehicles"));
        // Alert entries never carry a vehicle, so they can never feed the
        // usage-diversity count.
        assert!(entry.vehicle_number.is_none());
    }

    #[test]
    fn scan_source_wire_form() {
        assert_eq!(serde_json::to_string(&ScanSource::Ocr).unwrap(), "\"OCR\"");
        assert_eq!(ScanSource::Manual.to_string(), "Manual");
    }
}
