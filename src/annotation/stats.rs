//! Aggregate quality statistics over the word hierarchy.

use serde::Serialize;

use crate::config::thresholds;

use super::{AnnotationDocument, StatsError};

/// Aggregate statistics for one annotation document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub word_count: usize,
    /// Arithmetic mean over every word; absent confidence counts as 0.0 in
    /// the numerator and the word still counts in the denominator.
    pub mean_confidence: f64,
    /// Words with confidence strictly below the flag threshold.
    pub flagged_word_count: usize,
    /// Blocks on the first page only. Documents are single-page in this
    /// pipeline; summing across pages would silently misreport.
    pub block_count: usize,
}

/// Walk every word exactly once and aggregate.
///
/// Unlike text extraction there is no flattened-text fallback: statistics
/// are undefined without the hierarchy, and a zero-word hierarchy is
/// signaled rather than producing NaN.
pub fn aggregate_stats(doc: &AnnotationDocument) -> Result<Stats, StatsError> {
    if doc.pages.is_empty() {
        return Err(StatsError::NoStructuralData);
    }

    let block_count = doc.pages[0].blocks.len();

    let mut word_count = 0usize;
    let mut confidence_sum = 0.0f64;
    let mut flagged_word_count = 0usize;

    for page in &doc.pages {
        for block in &page.blocks {
            for paragraph in &block.paragraphs {
                for word in &paragraph.words {
                    word_count += 1;
                    let confidence = word.confidence.unwrap_or(0.0);
                    confidence_sum += confidence;
                    if confidence < thresholds::FLAGGED_WORD {
                        flagged_word_count += 1;
                    }
                }
            }
        }
    }

    if word_count == 0 {
        // Block count stays reportable through the error payload.
        return Err(StatsError::NoWords { block_count });
    }

    Ok(Stats {
        word_count,
        mean_confidence: confidence_sum / word_count as f64,
        flagged_word_count,
        block_count,
    })
}
