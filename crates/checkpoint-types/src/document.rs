use serde::{Deserialize, Serialize};

/// Which kind of document an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Dl,
    Rc,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Dl => write!(f, "DL"),
            DocumentKind::Rc => write!(f, "RC"),
        }
    }
}

/// Outcome of resolving a document identifier against the reference store.
///
/// Only `valid` and `blacklisted` are ever stored on a record; `not_found`
/// and `no_data_provided` classify the query outcome itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Valid,
    Blacklisted,
    NotFound,
    NoDataProvided,
}

impl DocumentStatus {
    /// Map a stored status column back to the enum. Unknown values are
    /// treated as `valid`, mirroring how records default on insert.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "blacklisted" => DocumentStatus::Blacklisted,
            _ => DocumentStatus::Valid,
        }
    }

    /// True when the status refers to an actual stored record.
    pub fn is_resolved(&self) -> bool {
        matches!(self, DocumentStatus::Valid | DocumentStatus::Blacklisted)
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Valid => write!(f, "valid"),
            DocumentStatus::Blacklisted => write!(f, "blacklisted"),
            DocumentStatus::NotFound => write!(f, "not_found"),
            DocumentStatus::NoDataProvided => write!(f, "no_data_provided"),
        }
    }
}

/// Resolved driving-license payload for one verification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlData {
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl DlData {
    pub fn no_data() -> Self {
        Self {
            status: DocumentStatus::NoDataProvided,
            license_number: None,
            name: None,
            validity: None,
            phone_number: None,
        }
    }

    pub fn not_found(license_number: impl Into<String>) -> Self {
        Self {
            status: DocumentStatus::NotFound,
            license_number: Some(license_number.into()),
            name: None,
            validity: None,
            phone_number: None,
        }
    }
}

/// Resolved registration-certificate payload for one verification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RcData {
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regn_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chassis_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_upto: Option<String>,
}

impl RcData {
    pub fn no_data() -> Self {
        Self {
            status: DocumentStatus::NoDataProvided,
            regn_number: None,
            owner_name: None,
            vehicle_class: None,
            chassis_number: None,
            engine_number: None,
            valid_upto: None,
        }
    }

    pub fn not_found(regn_number: impl Into<String>) -> Self {
        Self {
            status: DocumentStatus::NotFound,
            regn_number: Some(regn_number.into()),
            owner_name: None,
            vehicle_class: None,
            chassis_number: None,
            engine_number: None,
            valid_upto: None,
        }
    }
}
