//! Wrapper-shape normalization for raw OCR payloads.
//!
//! Providers and re-serialization tools disagree on wrapping depth: the
//! canonical object may sit at the root, under `fullTextAnnotation`, or
//! under `responses[0]` (optionally wrapped again). Resolving that once at
//! this boundary means every downstream consumer sees one shape.

use serde_json::Value;

use super::{AnnotationDocument, NormalizationError};

/// Reduce a raw parsed JSON value of unknown wrapping to the canonical
/// [`AnnotationDocument`].
///
/// Unwrapping is ordered, first match wins, and each step passes through
/// when its key is absent. No content validation happens here: a fully
/// empty document is a downstream concern, not a normalization failure.
pub fn normalize(raw: Value) -> Result<AnnotationDocument, NormalizationError> {
    let mut value = raw;

    // Batch envelope: {"responses": [<response>, ...]}. Only the first
    // response is meaningful for single-image requests.
    if let Some(responses) = value.get_mut("responses").and_then(Value::as_array_mut) {
        if responses.is_empty() {
            return Err(NormalizationError::EmptyResponseList);
        }
        value = responses.swap_remove(0);
    }

    // Single-response envelope: {"fullTextAnnotation": {...}}.
    if let Some(annotation) = value.get_mut("fullTextAnnotation").map(Value::take) {
        value = annotation;
    }

    serde_json::from_value(value).map_err(|e| NormalizationError::MalformedDocument(e.to_string()))
}
