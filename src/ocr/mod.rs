//! External OCR provider interface and the Vision-backed client.

pub mod vision;

pub use vision::*;

use thiserror::Error;

use crate::annotation::NormalizationError;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OCR API rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("missing OCR credentials: set {0}")]
    MissingCredentials(&'static str),

    /// The provider answered successfully but produced no annotation at
    /// all. Distinct from transport/auth failure: the page is probably
    /// blank or unreadable, retrying will not help.
    #[error("provider returned a response with no annotation")]
    EmptyAnnotation,

    #[error("unusable provider response: {0}")]
    Normalization(#[from] NormalizationError),
}
