/// Application-level constants
pub const APP_NAME: &str = "lexiscan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory scanned for page images by the batch run.
pub const INPUT_DIR: &str = "pages";

/// Directory receiving one annotation JSON per digitized image.
pub const OUTPUT_DIR: &str = "annotations";

/// Image formats accepted by the batch scanner (lowercase, no dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff"];

/// Environment variable holding the Vision API key.
pub const API_KEY_ENV: &str = "VISION_API_KEY";

/// Dense-document text detection endpoint.
pub const VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Language hints sent with every annotate request. Dictionary pages mix
/// the headword language with the glossing language.
pub const DEFAULT_LANGUAGE_HINTS: &[&str] = &["la", "en"];

/// Confidence thresholds used by the auditor and batch reporting.
pub mod thresholds {
    /// Words below this confidence are flagged for manual review.
    pub const FLAGGED_WORD: f64 = 0.80;

    /// A page passes audit when its mean word confidence exceeds this.
    pub const AUDIT_PASS_MEAN: f64 = 0.90;
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "lexiscan=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn image_extensions_are_lowercase() {
        for ext in IMAGE_EXTENSIONS {
            assert_eq!(*ext, ext.to_lowercase());
            assert!(!ext.starts_with('.'));
        }
    }

    #[test]
    fn flag_threshold_below_pass_threshold() {
        assert!(thresholds::FLAGGED_WORD < thresholds::AUDIT_PASS_MEAN);
    }
}
