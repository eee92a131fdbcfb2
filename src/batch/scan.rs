//! Input enumeration and annotation persistence.

use std::fs;
use std::path::{Path, PathBuf};

use crate::annotation::AnnotationDocument;
use crate::config;

use super::BatchError;

/// List page images in `dir`, restricted to the configured extension
/// allow-list, in stable sorted order.
pub fn scan_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let entries = fs::read_dir(dir).map_err(|source| BatchError::FileAccess {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BatchError::FileAccess {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            config::IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Persist one normalized annotation keyed by its source image's base
/// filename. Creates `output_dir` when missing.
pub fn persist_annotation(
    output_dir: &Path,
    image_path: &Path,
    document: &AnnotationDocument,
) -> Result<PathBuf, BatchError> {
    fs::create_dir_all(output_dir).map_err(|source| BatchError::FileAccess {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    let target = output_dir.join(format!("{stem}.json"));

    let body = serde_json::to_string_pretty(document)?;
    fs::write(&target, body).map_err(|source| BatchError::FileAccess {
        path: target.clone(),
        source,
    })?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::normalize;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"fake").unwrap();
    }

    // ── scan_images ──

    #[test]
    fn scan_filters_to_image_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "page-001.jpg");
        touch(dir.path(), "page-002.png");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "index.json");

        let images = scan_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["page-001.jpg", "page-002.png"]);
    }

    #[test]
    fn scan_accepts_uppercase_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "scan.JPG");
        touch(dir.path(), "scan2.TIFF");

        let images = scan_images(dir.path()).unwrap();
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn scan_skips_extensionless_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "README");

        assert!(scan_images(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn scan_order_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.jpg");
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "c.jpg");

        let images = scan_images(dir.path()).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn missing_directory_is_file_access_error() {
        let err = scan_images(Path::new("/nonexistent/pages")).unwrap_err();
        assert!(matches!(err, BatchError::FileAccess { .. }));
    }

    // ── persist_annotation ──

    #[test]
    fn persists_keyed_by_image_stem() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("annotations");
        let doc = AnnotationDocument {
            text: Some("A fortiori".into()),
            pages: vec![],
        };

        let target =
            persist_annotation(&output, Path::new("pages/page-007.jpg"), &doc).unwrap();
        assert_eq!(target, output.join("page-007.json"));
        assert!(target.exists());
    }

    #[test]
    fn persisted_annotation_round_trips_through_normalize() {
        let dir = tempfile::tempdir().unwrap();
        let doc = AnnotationDocument {
            text: Some("ad hoc".into()),
            pages: vec![],
        };

        let target = persist_annotation(dir.path(), Path::new("x.png"), &doc).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(target).unwrap()).unwrap();
        assert_eq!(normalize(raw).unwrap(), doc);
    }

    #[test]
    fn creates_output_directory_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("deep");
        let doc = AnnotationDocument::default();

        persist_annotation(&nested, Path::new("p.jpg"), &doc).unwrap();
        assert!(nested.is_dir());
    }
}
