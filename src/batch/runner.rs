//! Sequential batch loop with per-file isolation.
//!
//! One OCR call at a time. A failure on one page is logged and recorded in
//! the summary, never aborting the rest of the run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::ocr::AnnotateProvider;

use super::scan::{persist_annotation, scan_images};
use super::BatchError;

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: usize,
    /// Per-file failures, in input order.
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Digitize every image under `input_dir`, persisting one annotation JSON
/// per image under `output_dir`.
///
/// The provider handle is borrowed for the duration of the run; the caller
/// owns its lifecycle.
pub fn run_batch(
    provider: &dyn AnnotateProvider,
    input_dir: &Path,
    output_dir: &Path,
    language_hints: &[String],
) -> Result<BatchSummary, BatchError> {
    let images = scan_images(input_dir)?;
    tracing::info!(
        input_dir = %input_dir.display(),
        images = images.len(),
        "starting batch digitization"
    );

    let mut summary = BatchSummary::default();
    for image_path in &images {
        match digitize_one(provider, image_path, output_dir, language_hints) {
            Ok(target) => {
                summary.succeeded += 1;
                tracing::info!(
                    image = %image_path.display(),
                    annotation = %target.display(),
                    "page digitized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    image = %image_path.display(),
                    error = %e,
                    "page failed, continuing batch"
                );
                summary.failures.push((image_path.clone(), e.to_string()));
            }
        }
    }

    Ok(summary)
}

fn digitize_one(
    provider: &dyn AnnotateProvider,
    image_path: &Path,
    output_dir: &Path,
    language_hints: &[String],
) -> Result<PathBuf, BatchError> {
    let start = Instant::now();

    let bytes = fs::read(image_path).map_err(|source| BatchError::FileAccess {
        path: image_path.to_path_buf(),
        source,
    })?;

    let document = provider.annotate(&bytes, language_hints)?;
    let target = persist_annotation(output_dir, image_path, &document)?;

    tracing::debug!(
        image = %image_path.display(),
        elapsed_ms = %start.elapsed().as_millis(),
        "annotate + persist"
    );

    Ok(target)
}
