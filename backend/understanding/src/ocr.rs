//! Optical character recognition.
//!
//! The extraction engine never sees images; a provider turns uploaded image
//! bytes into raw text first. The default provider is the Google Cloud Vision
//! `images:annotate` REST endpoint with `DOCUMENT_TEXT_DETECTION`.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const DOCUMENT_TEXT_DETECTION: &str = "DOCUMENT_TEXT_DETECTION";

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR request failed: {0}")]
    Transport(reqwest::Error),

    #[error("OCR service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("OCR service error {code}: {message}")]
    Api { code: i32, message: String },

    #[error("OCR provider not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for OcrError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL may carry an API key.
        OcrError::Transport(err.without_url())
    }
}

/// Turns image bytes into recognized text.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider name for logs (e.g., "google-vision").
    fn name(&self) -> &str;

    /// Recognize all text in the image. An image with no text yields an
    /// empty string, not an error.
    async fn detect_document_text(&self, image: &[u8]) -> Result<String, OcrError>;
}

/// How requests to Cloud Vision are authorized.
#[derive(Clone)]
pub enum VisionAuth {
    /// API key sent as the `key` query parameter.
    ApiKey(String),
    /// OAuth access token sent as a bearer token.
    BearerToken(String),
}

impl std::fmt::Debug for VisionAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisionAuth::ApiKey(_) => f.write_str("ApiKey([redacted])"),
            VisionAuth::BearerToken(_) => f.write_str("BearerToken([redacted])"),
        }
    }
}

/// Google Cloud Vision document text detection.
#[derive(Debug, Clone)]
pub struct GoogleVisionOcr {
    client: reqwest::Client,
    endpoint: String,
    auth: VisionAuth,
}

impl GoogleVisionOcr {
    /// `endpoint` is the Vision host, e.g. `https://vision.googleapis.com`
    /// (the config default), an emulator or a proxy. A trailing `/` is ignored.
    pub fn new(endpoint: impl Into<String>, auth: VisionAuth) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, OcrError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn annotate_url(&self) -> String {
        format!("{}/v1/images:annotate", self.endpoint)
    }
}

#[async_trait]
impl OcrProvider for GoogleVisionOcr {
    fn name(&self) -> &str {
        "google-vision"
    }

    async fn detect_document_text(&self, image: &[u8]) -> Result<String, OcrError> {
        info!(bytes = image.len(), "[OCR] Detecting document text via Cloud Vision");

        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    kind: DOCUMENT_TEXT_DETECTION,
                }],
            }],
        };

        let request = self.client.post(self.annotate_url()).json(&body);
        let request = match &self.auth {
            VisionAuth::ApiKey(key) => request.query(&[("key", key)]),
            VisionAuth::BearerToken(token) => request.bearer_auth(token),
        };

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(OcrError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let parsed: AnnotateResponse = resp.json().await?;
        let text = text_from_response(parsed)?;
        debug!(chars = text.len(), "[OCR] Text detected");
        Ok(text)
    }
}

/// Stand-in used when no OCR credentials are configured. Every request fails
/// with [`OcrError::NotConfigured`], so the service can still start and serve
/// health checks.
#[derive(Debug, Clone, Default)]
pub struct DisabledOcr;

#[async_trait]
impl OcrProvider for DisabledOcr {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn detect_document_text(&self, _image: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotConfigured(
            "set GOOGLE_VISION_API_KEY or GOOGLE_VISION_ACCESS_TOKEN".to_string(),
        ))
    }
}

// --- Wire format ---

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    full_text_annotation: Option<TextAnnotation>,
    error: Option<RpcStatus>,
}

#[derive(Debug, Default, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
struct RpcStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Pull the document text out of the first image response.
fn text_from_response(resp: AnnotateResponse) -> Result<String, OcrError> {
    let Some(first) = resp.responses.into_iter().next() else {
        return Ok(String::new());
    };
    if let Some(status) = first.error {
        if status.code != 0 {
            return Err(OcrError::Api {
                code: status.code,
                message: status.message,
            });
        }
    }
    Ok(first.full_text_annotation.map(|a| a.text).unwrap_or_default())
}
