pub mod audit;
pub mod document;

pub use audit::{AuditLogEntry, ScanSource};
pub use document::{DlData, DocumentKind, DocumentStatus, RcData};
