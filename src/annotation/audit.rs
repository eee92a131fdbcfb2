//! Pass/fail quality report over aggregate statistics.

use std::fmt;

use serde::Serialize;

use crate::config::thresholds;

use super::Stats;

/// Maximum characters of reconstructed text echoed into the report.
const SAMPLE_CHARS: usize = 80;

/// Structured audit outcome for one annotation file.
///
/// A structured record rather than printed lines; rendering to a
/// human-readable block is the `Display` impl, kept separate so the verdict
/// itself stays testable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub word_count: usize,
    pub mean_confidence: f64,
    pub flagged_word_count: usize,
    pub block_count: usize,
    /// Mean confidence strictly above the pass threshold; exactly at the
    /// threshold fails.
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_sample: Option<String>,
}

/// Derive the audit verdict from aggregate statistics.
pub fn audit(stats: &Stats, text_sample: Option<&str>) -> AuditReport {
    AuditReport {
        word_count: stats.word_count,
        mean_confidence: stats.mean_confidence,
        flagged_word_count: stats.flagged_word_count,
        block_count: stats.block_count,
        passed: stats.mean_confidence > thresholds::AUDIT_PASS_MEAN,
        text_sample: text_sample.map(truncate_sample),
    }
}

fn truncate_sample(text: &str) -> String {
    if text.chars().count() <= SAMPLE_CHARS {
        return text.to_string();
    }
    let mut sample: String = text.chars().take(SAMPLE_CHARS).collect();
    sample.push('…');
    sample
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  words:           {}", self.word_count)?;
        writeln!(f, "  mean confidence: {:.4}", self.mean_confidence)?;
        writeln!(f, "  flagged words:   {}", self.flagged_word_count)?;
        writeln!(f, "  blocks:          {}", self.block_count)?;
        write!(
            f,
            "  status:          {}",
            if self.passed { "PASS" } else { "FAIL" }
        )?;
        if let Some(sample) = &self.text_sample {
            write!(f, "\n  sample:          {sample:?}")?;
        }
        Ok(())
    }
}
