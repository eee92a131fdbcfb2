//! Plain-text reconstruction from the layout hierarchy.

use super::{AnnotationDocument, BreakType};

/// Which of the two text representations wins when both are present.
///
/// The provider's flattened `text` field has been observed truncated after
/// re-serialization while the hierarchy survived intact, so `LayoutFirst`
/// is the default: walk the hierarchy whenever pages exist and use `text`
/// only as a fallback. `FlattenedFirst` trusts the provider's own
/// flattening unconditionally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextSource {
    #[default]
    LayoutFirst,
    FlattenedFirst,
}

/// Reconstruct plain text with the default [`TextSource::LayoutFirst`]
/// policy.
pub fn extract_text(doc: &AnnotationDocument) -> String {
    extract_text_with(doc, TextSource::default())
}

/// Reconstruct plain text using an explicit text-source policy.
///
/// The hierarchy walk visits pages, blocks, paragraphs, words, and symbols
/// in document order, emitting each symbol's text followed by whatever
/// whitespace its break type calls for. After each block a newline is
/// appended unless one is already there, so layout regions stay separated
/// even when the provider omitted a trailing break on the block's last
/// word. Only trailing whitespace is trimmed; interior whitespace is
/// preserved exactly as emitted.
pub fn extract_text_with(doc: &AnnotationDocument, source: TextSource) -> String {
    if source == TextSource::FlattenedFirst {
        if let Some(text) = &doc.text {
            return text.clone();
        }
    }

    if doc.pages.is_empty() {
        // Degraded document: no hierarchy to walk. The flattened field is
        // all we have, possibly nothing.
        return doc.text.clone().unwrap_or_default();
    }

    let mut out = String::new();
    for page in &doc.pages {
        for block in &page.blocks {
            for paragraph in &block.paragraphs {
                for word in &paragraph.words {
                    for symbol in &word.symbols {
                        if let Some(text) = &symbol.text {
                            out.push_str(text);
                        }
                        match symbol.break_type {
                            Some(BreakType::LineBreak) | Some(BreakType::EolSureSpace) => {
                                out.push('\n');
                            }
                            Some(BreakType::Space) | Some(BreakType::SureSpace) => {
                                out.push(' ');
                            }
                            _ => {}
                        }
                    }
                }
            }
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}
