//! Annotation normalization, text reconstruction, and quality auditing.
//!
//! Everything here is a synchronous, pure function over in-memory data: the
//! I/O lives in `batch` and `ocr`. A document's lifetime is scoped to one
//! file's processing; there is no cross-file state.

pub mod audit;
pub mod document;
pub mod normalize;
pub mod reconstruct;
pub mod stats;

pub use audit::*;
pub use document::*;
pub use normalize::*;
pub use reconstruct::*;
pub use stats::*;

use thiserror::Error;

/// Failure to reduce a raw JSON value to the canonical document shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("provider response list is empty")]
    EmptyResponseList,

    #[error("malformed annotation document: {0}")]
    MalformedDocument(String),
}

/// Statistics failure. Distinct from a low-confidence success: callers can
/// tell "could not measure" from "measured and it's bad".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("annotation has no page hierarchy; statistics are undefined")]
    NoStructuralData,

    #[error("annotation contains no words ({block_count} blocks); mean confidence would divide by zero")]
    NoWords { block_count: usize },
}
