//! Form image discovery
//!
//! Lists the top level of the forms directory and keeps files with an image
//! extension. Subdirectories are not descended into.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ai::extraction::vision::is_image_extension;
use crate::error::{ForminatorError, Result};

/// Collect `jpg`/`jpeg`/`png` files (any case) directly inside `directory`
///
/// Entries that cannot be read are skipped. The result is sorted by path so
/// progress output is stable between runs.
pub fn collect_image_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let discovery_error = |source| ForminatorError::Discovery {
        path: directory.to_path_buf(),
        source,
    };

    let entries = fs::read_dir(directory).map_err(discovery_error)?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry in {}: {}", directory.display(), e);
                continue;
            }
        };

        // Follows symlinks
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if is_image_extension(path.extension().and_then(|e| e.to_str())) {
            files.push(path);
        }
    }

    files.sort();
    tracing::info!(
        "Found {} image files to process in {}",
        files.len(),
        directory.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        for name in ["A.JPG", "b.png", "c.txt", "d"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let files = collect_image_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["A.JPG", "b.png"]);
    }

    #[test]
    fn test_subdirectories_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub/inner.jpg")).unwrap();
        File::create(dir.path().join("top.jpeg")).unwrap();

        let files = collect_image_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("top.jpeg")]);
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        assert!(collect_image_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_discovery_error() {
        let dir = TempDir::new().unwrap();
        let err = collect_image_files(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ForminatorError::Discovery { .. }));
    }

    #[test]
    fn test_file_path_is_discovery_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("form.png");
        File::create(&file).unwrap();
        assert!(matches!(
            collect_image_files(&file),
            Err(ForminatorError::Discovery { .. })
        ));
    }
}
