//! Canonical annotation document model.
//!
//! One `AnnotationDocument` per scanned page, as the OCR provider returns it
//! once the wrapper envelopes are stripped (see [`super::normalize`]). The
//! tree is immutable after construction; no consumer mutates it.

use serde::{Deserialize, Serialize};

/// Normalized OCR result for one page image.
///
/// `text` is the provider's flattened full-page text; it may be absent, and
/// intermediate tooling has been observed truncating it. `pages` carries the
/// four-level layout hierarchy. When `pages` is empty only `text` is
/// usable: a degraded-data state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Page>,
}

impl AnnotationDocument {
    /// True when neither flattened text nor hierarchy is present.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.pages.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Block>,
}

/// A physical layout region: a column, a dictionary entry, a header.
///
/// Block order is whatever the provider returned; it is not guaranteed to
/// match physical top-to-bottom reading order (known upstream limitation,
/// not corrected here).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Word {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<Symbol>,
    /// Provider-assigned probability in [0, 1] that this word is correct.
    /// Absent confidence counts as 0.0 during aggregation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Symbol {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Whitespace that follows this symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_type: Option<BreakType>,
}

/// Inter-symbol break semantics, as named by the provider.
///
/// Only the four whitespace-bearing kinds matter to reconstruction; every
/// other value (`HYPHEN`, `UNKNOWN`, future additions) collapses into
/// `Other` and emits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakType {
    LineBreak,
    EolSureSpace,
    Space,
    SureSpace,
    Hyphen,
    #[serde(other)]
    Other,
}
