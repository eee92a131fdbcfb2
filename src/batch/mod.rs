//! Sequential batch digitization: scan, annotate, persist.

pub mod runner;
pub mod scan;

pub use runner::*;
pub use scan::*;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ocr::OcrError;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("cannot serialize annotation: {0}")]
    Serialize(#[from] serde_json::Error),
}
