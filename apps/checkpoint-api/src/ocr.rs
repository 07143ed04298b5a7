//! OCR boundary adapters
//!
//! Both recognition engines are external collaborators: the DL side shells
//! out to a local `tesseract` install, the RC side POSTs the image to a
//! dedicated text-recognition service. Any failure at this boundary
//! uniformly degrades to "no candidate" so a bad image or an unreachable
//! engine never aborts the verification request.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use checkpoint_types::DocumentKind;
use serde::Deserialize;
use tokio::process::Command;

/// Capability for turning a conditioned document image into a candidate
/// identifier. Implementations must never error out; extraction failure is
/// expressed as `None`.
#[async_trait]
pub trait IdentifierExtractor: Send + Sync {
    async fn extract_identifier(&self, image: &Path) -> Option<String>;
}

/// DL extraction via a local tesseract binary.
pub struct TesseractDlExtractor {
    command: String,
}

impl TesseractDlExtractor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("TESSERACT_CMD").unwrap_or_else(|_| "tesseract".to_string()))
    }
}

#[async_trait]
impl IdentifierExtractor for TesseractDlExtractor {
    async fn extract_identifier(&self, image: &Path) -> Option<String> {
        let output = match Command::new(&self.command)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg("eng")
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("tesseract invocation failed: {}", e);
                return None;
            }
        };

        if !output.status.success() {
            tracing::warn!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
            return None;
        }

        let text = String::from_utf8_lossy(&output.stdout);
        tracing::debug!("DL OCR text: {}", text);

        let candidate = verify_engine::extract_dl_candidate(&text);
        match &candidate {
            Some(dl) => tracing::info!("Extracted DL from image: {}", dl),
            None => tracing::warn!("DL OCR did not yield a valid 15-character DL number"),
        }
        candidate
    }
}

/// Response shape of the RC recognition service.
#[derive(Debug, Deserialize)]
struct RcRecognitionResponse {
    recognized_text: Option<String>,
}

/// RC extraction via the remote text-recognition service.
///
/// The service returns raw recognized text; the plate number is
/// reconstructed locally from it. One request per image, explicit timeout,
/// no retry. Callers treat any failure as "no candidate".
pub struct RemoteRcExtractor {
    client: reqwest::Client,
    service_url: String,
}

impl RemoteRcExtractor {
    pub fn new(service_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            service_url: service_url.into(),
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var("RC_OCR_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:5000/recognize_rc".to_string());
        Self::new(url)
    }
}

#[async_trait]
impl IdentifierExtractor for RemoteRcExtractor {
    async fn extract_identifier(&self, image: &Path) -> Option<String> {
        let bytes = match tokio::fs::read(image).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("failed to read RC image {}: {}", image.display(), e);
                return None;
            }
        };

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("rc_image.jpg")
            .mime_str("image/jpeg")
            .ok()?;
        let form = reqwest::multipart::Form::new().part("rc_image", part);

        let response = match self
            .client
            .post(&self.service_url)
            .multipart(form)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("RC recognition service unreachable: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("RC recognition service returned {}", response.status());
            return None;
        }

        let body: RcRecognitionResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("RC recognition service sent malformed response: {}", e);
                return None;
            }
        };

        let recognized = body.recognized_text?;
        tracing::info!("RC recognition result: {}", recognized);

        // Prefer a structurally valid plate reconstruction; fall back to
        // the cleaned text for plates outside the standard structure.
        verify_engine::extract_rc_candidate(&[recognized.as_str()])
            .or_else(|| verify_engine::normalize(&recognized, DocumentKind::Rc))
    }
}
