//! Expand command-line paths into the Python source files to check.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Collect `.py` files from `paths`.
///
/// A file path is taken as given, whatever its extension. A directory is walked recursively,
/// skipping hidden directories. The result is sorted and free of duplicates.
pub fn find_files<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        collect(path.as_ref(), &mut files);
    }
    files.sort();
    files.dedup();
    files
}

fn collect(path: &Path, files: &mut Vec<PathBuf>) {
    if !path.is_dir() {
        files.push(path.to_path_buf());
        return;
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot read directory");
            return;
        }
    };
    for entry in entries.flatten() {
        let entry_path = entry.path();
        let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if entry_path.is_dir() {
            if !name.starts_with('.') {
                collect(&entry_path, files);
            }
        } else if entry_path.extension().is_some_and(|ext| ext == "py") {
            files.push(entry_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cases() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/resolver")
    }

    #[test]
    fn test_walks_directories_for_python_files() {
        let root = cases();
        let files = find_files(&[&root]);
        let relative: Vec<_> = files.iter().map(|f| f.strip_prefix(&root).unwrap().to_path_buf()).collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("outer.py"),
                PathBuf::from("pkg/__init__.py"),
                PathBuf::from("pkg/mod.py"),
                PathBuf::from("pkg/subpkg/__init__.py"),
                PathBuf::from("pkg/subpkg/submod.py"),
                PathBuf::from("scripts/inner.py"),
            ]
        );
    }

    #[test]
    fn test_explicit_files_are_kept_and_deduplicated() {
        let root = cases();
        let outer = root.join("outer.py");
        let config = root.join("config.yml");
        let files = find_files(&[outer.clone(), config.clone(), outer.clone()]);
        assert_eq!(files, vec![config, outer]);
    }
}
