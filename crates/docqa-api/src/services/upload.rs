//! Upload storage: the pipeline consumes a plain directory whose contents
//! are replaced wholesale on every upload.

use std::path::{Component, Path};

use docqa_core::error::Result;

/// Save uploaded files into `upload_dir`, clearing any previous contents
/// first so the corpus never accumulates across uploads.
///
/// Filenames are reduced to their final path component; files whose names
/// sanitize away entirely are skipped. Returns the number of files written.
pub fn save_uploaded_files(files: &[(String, Vec<u8>)], upload_dir: &Path) -> Result<usize> {
    if upload_dir.exists() {
        std::fs::remove_dir_all(upload_dir)?;
    }
    std::fs::create_dir_all(upload_dir)?;

    let mut saved = 0;

    for (filename, data) in files {
        let Some(safe_name) = sanitize_filename(filename) else {
            tracing::warn!(filename = %filename, "Skipping file with unusable name");
            continue;
        };

        std::fs::write(upload_dir.join(&safe_name), data)?;
        saved += 1;
    }

    Ok(saved)
}

/// Reduce a client-supplied filename to a bare file name, rejecting path
/// traversal and empty names.
fn sanitize_filename(filename: &str) -> Option<String> {
    let path = Path::new(filename);

    let name = path.components().next_back().and_then(|component| match component {
        Component::Normal(name) => name.to_str(),
        _ => None,
    })?;

    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return None;
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_name() {
        assert_eq!(sanitize_filename("report.pdf"), Some("report.pdf".to_string()));
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(
            sanitize_filename("/etc/passwd/../report.pdf"),
            Some("report.pdf".to_string())
        );
        assert_eq!(sanitize_filename("dir/report.pdf"), Some("report.pdf".to_string()));
    }

    #[test]
    fn test_sanitize_rejects_traversal_and_empty() {
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("/"), None);
    }

    #[test]
    fn test_save_clears_previous_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");

        let first = vec![("old.txt".to_string(), b"old corpus".to_vec())];
        save_uploaded_files(&first, &upload_dir).unwrap();
        assert!(upload_dir.join("old.txt").exists());

        let second = vec![("new.txt".to_string(), b"new corpus".to_vec())];
        let saved = save_uploaded_files(&second, &upload_dir).unwrap();

        assert_eq!(saved, 1);
        assert!(!upload_dir.join("old.txt").exists());
        assert!(upload_dir.join("new.txt").exists());
    }

    #[test]
    fn test_save_skips_unusable_names() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("uploads");

        let files = vec![
            ("..".to_string(), b"evil".to_vec()),
            ("good.txt".to_string(), b"fine".to_vec()),
        ];
        let saved = save_uploaded_files(&files, &upload_dir).unwrap();

        assert_eq!(saved, 1);
        assert!(upload_dir.join("good.txt").exists());
    }
}
