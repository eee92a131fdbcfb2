//! Dense-document OCR via the Cloud Vision REST API.
//!
//! `VisionClient` is the production [`AnnotateProvider`]: construct it once,
//! pass it by reference to the batch runner, and it is released when the
//! runner returns, on every exit path. `MockAnnotateProvider` serves tests
//! and offline runs that need deterministic annotations without network
//! access.

use base64::Engine as _;
use serde_json::{json, Value};

use crate::annotation::{normalize, AnnotationDocument};
use crate::config;

use super::OcrError;

/// Capability of turning one page image into an annotation document.
pub trait AnnotateProvider {
    fn annotate(
        &self,
        image_bytes: &[u8],
        language_hints: &[String],
    ) -> Result<AnnotationDocument, OcrError>;
}

/// Cloud Vision client. One instance per batch run.
pub struct VisionClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl VisionClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: config::VISION_ENDPOINT.to_string(),
            api_key,
        }
    }

    /// Read the API key from the environment.
    pub fn from_env() -> Result<Self, OcrError> {
        let api_key = std::env::var(config::API_KEY_ENV)
            .map_err(|_| OcrError::MissingCredentials(config::API_KEY_ENV))?;
        Ok(Self::new(api_key))
    }

    /// Override the endpoint (local stub servers in tests).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

impl AnnotateProvider for VisionClient {
    fn annotate(
        &self,
        image_bytes: &[u8],
        language_hints: &[String],
    ) -> Result<AnnotationDocument, OcrError> {
        let _span = tracing::info_span!("vision_annotate", image_size = image_bytes.len()).entered();
        let start = std::time::Instant::now();

        let content = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        let body = json!({
            "requests": [{
                "image": { "content": content },
                // Dense text mode: dictionary pages are wall-to-wall print.
                "features": [{ "type": "DOCUMENT_TEXT_DETECTION" }],
                "imageContext": { "languageHints": language_hints },
            }]
        });

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()?;

        let status = response.status();
        let payload: Value = response.json()?;
        let document = parse_annotate_response(status.as_u16(), payload)?;

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            pages = document.pages.len(),
            "annotation received"
        );

        Ok(document)
    }
}

/// Interpret one `images:annotate` payload.
///
/// The API signals failure two ways: a non-2xx status with a top-level
/// `error` object, or HTTP 200 with `responses[0].error` populated. Both
/// map to [`OcrError::Api`]; a clean response with nothing in it maps to
/// [`OcrError::EmptyAnnotation`].
fn parse_annotate_response(status: u16, payload: Value) -> Result<AnnotationDocument, OcrError> {
    if !(200..300).contains(&status) {
        return Err(OcrError::Api {
            status,
            message: error_message(payload.get("error")),
        });
    }

    if let Some(error) = payload.pointer("/responses/0/error") {
        let code = error.get("code").and_then(Value::as_u64).unwrap_or(0) as u16;
        return Err(OcrError::Api {
            status: code,
            message: error_message(Some(error)),
        });
    }

    let document = normalize(payload)?;
    if document.is_empty() {
        return Err(OcrError::EmptyAnnotation);
    }
    Ok(document)
}

fn error_message(error: Option<&Value>) -> String {
    error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string()
}

/// Mock provider for tests and offline runs.
pub struct MockAnnotateProvider {
    document: AnnotationDocument,
}

impl MockAnnotateProvider {
    pub fn new(document: AnnotationDocument) -> Self {
        Self { document }
    }

    /// Convenience: a document carrying only flattened text.
    pub fn with_text(text: &str) -> Self {
        Self::new(AnnotationDocument {
            text: Some(text.to_string()),
            pages: Vec::new(),
        })
    }
}

impl AnnotateProvider for MockAnnotateProvider {
    fn annotate(
        &self,
        _image_bytes: &[u8],
        _language_hints: &[String],
    ) -> Result<AnnotationDocument, OcrError> {
        if self.document.is_empty() {
            return Err(OcrError::EmptyAnnotation);
        }
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_annotate_response ──

    #[test]
    fn successful_payload_yields_document() {
        let payload = json!({
            "responses": [{
                "fullTextAnnotation": { "text": "abacus, -i" }
            }]
        });
        let doc = parse_annotate_response(200, payload).unwrap();
        assert_eq!(doc.text.as_deref(), Some("abacus, -i"));
    }

    #[test]
    fn http_error_maps_to_api_error() {
        let payload = json!({
            "error": { "code": 403, "message": "API key not valid" }
        });
        let err = parse_annotate_response(403, payload).unwrap_err();
        match err {
            OcrError::Api { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("API key"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn per_response_error_maps_to_api_error() {
        let payload = json!({
            "responses": [{
                "error": { "code": 3, "message": "Bad image data" }
            }]
        });
        let err = parse_annotate_response(200, payload).unwrap_err();
        match err {
            OcrError::Api { status, message } => {
                assert_eq!(status, 3);
                assert!(message.contains("Bad image data"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn empty_response_object_is_empty_annotation() {
        // A successful call with nothing recognized: {"responses": [{}]}.
        let payload = json!({ "responses": [{}] });
        assert!(matches!(
            parse_annotate_response(200, payload),
            Err(OcrError::EmptyAnnotation)
        ));
    }

    #[test]
    fn empty_response_list_surfaces_normalization_error() {
        let payload = json!({ "responses": [] });
        assert!(matches!(
            parse_annotate_response(200, payload),
            Err(OcrError::Normalization(_))
        ));
    }

    #[test]
    fn error_without_message_falls_back() {
        let err = parse_annotate_response(500, json!({})).unwrap_err();
        match err {
            OcrError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "unknown error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    // ── MockAnnotateProvider ──

    #[test]
    fn mock_returns_configured_document() {
        let provider = MockAnnotateProvider::with_text("ager, agri");
        let doc = provider.annotate(b"fake-scan", &[]).unwrap();
        assert_eq!(doc.text.as_deref(), Some("ager, agri"));
    }

    #[test]
    fn mock_with_empty_document_signals_empty_annotation() {
        let provider = MockAnnotateProvider::new(AnnotationDocument::default());
        assert!(matches!(
            provider.annotate(b"blank-page", &[]),
            Err(OcrError::EmptyAnnotation)
        ));
    }

    // ── VisionClient construction ──

    #[test]
    fn endpoint_override_applies() {
        let client = VisionClient::new("k".into()).with_endpoint("http://127.0.0.1:9/annotate");
        assert_eq!(client.endpoint, "http://127.0.0.1:9/annotate");
    }
}
