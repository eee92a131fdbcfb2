//! Dictionary page digitization pipeline.
//!
//! Scanned pages go to a cloud OCR provider ([`ocr`]), the returned
//! annotations are normalized into one canonical shape and persisted
//! ([`batch`]), and the [`annotation`] layer reconstructs plain text and
//! audits recognition quality from the stored documents.

pub mod annotation;
pub mod batch;
pub mod config;
pub mod ocr;
