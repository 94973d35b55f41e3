use crate::error::PriceMachineError;
use crate::helpers::string::fold_case;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

/// Errors related to locating price-list files.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Directory '{path}' not found")]
    DirectoryNotFound { path: String },
}

/// Recursively collects files under `root` whose name contains `marker`, ignoring case.
///
/// Directories are visited in file name order and symlinked directories are not
/// descended into, so every file is reported once. Symlinked files are kept.
/// Unreadable entries are logged and skipped.
pub fn discover(root: &Path, marker: &str) -> Result<Vec<PathBuf>, PriceMachineError> {
    if !root.is_dir() {
        Err(DiscoveryError::DirectoryNotFound {
            path: root.display().to_string(),
        })?;
    }

    let marker = fold_case(marker);
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.path().is_file() && has_marker(entry.path(), &marker) => {
                files.push(entry.into_path());
            }
            Ok(_) => (),
            Err(error) => warn!(path = ?error.path(), "Skip unreadable entry: {}", error),
        }
    }
    Ok(files)
}

/// Checks whether the file name contains an already case-folded marker.
fn has_marker(path: &Path, marker: &str) -> bool {
    path.file_name()
        .map(|name| fold_case(&name.to_string_lossy()).contains(marker))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn file_names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_discover_recursive_case_insensitive() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("suppliers/north")).unwrap();
        fs::write(root.path().join("price_1.csv"), "").unwrap();
        fs::write(root.path().join("suppliers/PRICE_2.csv"), "").unwrap();
        fs::write(root.path().join("suppliers/north/Pricelist.txt"), "").unwrap();
        fs::write(root.path().join("suppliers/north/notes.csv"), "").unwrap();
        fs::create_dir_all(root.path().join("price_archive")).unwrap();

        let files = discover(root.path(), "price").unwrap();
        assert_eq!(file_names(&files), vec!["PRICE_2.csv", "Pricelist.txt", "price_1.csv"]);
    }

    #[test]
    fn test_discover_is_stable() {
        let root = tempfile::tempdir().unwrap();
        for name in ["b_price.csv", "a_price.csv", "c_price.csv"] {
            fs::write(root.path().join(name), "").unwrap();
        }
        let first = discover(root.path(), "price").unwrap();
        let second = discover(root.path(), "price").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_discover_sorted_by_name() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("b")).unwrap();
        fs::write(root.path().join("b/price.csv"), "").unwrap();
        fs::write(root.path().join("c_price.csv"), "").unwrap();
        fs::write(root.path().join("a_price.csv"), "").unwrap();

        let files = discover(root.path(), "price").unwrap();
        let relative: Vec<&Path> = files.iter().map(|path| path.strip_prefix(root.path()).unwrap()).collect();
        assert_eq!(
            relative,
            vec![Path::new("a_price.csv"), Path::new("b/price.csv"), Path::new("c_price.csv")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_symlinked_directories() {
        use std::os::unix::fs::symlink;

        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("price.csv"), "").unwrap();
        symlink(root.path(), root.path().join("loop")).unwrap();
        fs::create_dir_all(root.path().join("nested")).unwrap();
        symlink(root.path().join("price.csv"), root.path().join("nested/price_link.csv")).unwrap();

        let files = discover(root.path(), "price").unwrap();
        assert_eq!(files, vec![root.path().join("nested/price_link.csv"), root.path().join("price.csv")]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("prices");
        let error = discover(&missing, "price").unwrap_err();
        assert!(matches!(
            error,
            PriceMachineError::DiscoveryError(DiscoveryError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_discover_rejects_plain_file() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("price.csv");
        fs::write(&file, "").unwrap();
        assert!(discover(&file, "price").is_err());
    }

    #[test]
    fn test_discover_empty_directory() {
        let root = tempfile::tempdir().unwrap();
        assert!(discover(root.path(), "price").unwrap().is_empty());
    }
}
