//! Resolve source paths into fully qualified module names.
//!
//! A file or package directory is named after the chain of packages (directories holding an
//! `__init__.py`) that contain it: `pkg/subpkg/submod.py` resolves to `pkg.subpkg.submod`, and
//! the directory holding the outermost package is returned alongside, since that is the directory
//! an interpreter would need on its import path.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use typpy::frontend::resolver::ModuleResolver;
//!
//! let resolver = ModuleResolver::new();
//! let (name, root) = resolver.resolve(Path::new("pkg/mod.py"))?;
//! assert_eq!(name, "pkg.mod");
//! # Ok::<(), typpy::frontend::resolver::ResolveError>(())
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Marker file that turns a directory into a package.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// A path that cannot be imported as a module.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("'{}' is not a Python source file", path.display())]
    NotPythonFile { path: PathBuf },
    #[error("'{}' is a directory without an {PACKAGE_MARKER}", path.display())]
    NotAPackage { path: PathBuf },
    #[error("cannot make '{}' absolute: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Memoising path → module-name resolver.
///
/// Both the package test and resolved prefixes are cached per instance, so resolving many modules
/// of the same package touches each directory once.
#[derive(Debug, Default)]
pub struct ModuleResolver {
    packages: RefCell<HashMap<PathBuf, bool>>,
    resolved: RefCell<HashMap<PathBuf, (String, PathBuf)>>,
    fs_queries: Cell<usize>,
}

impl ModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `dir` contains an `__init__.py`.
    pub fn is_package(&self, dir: &Path) -> bool {
        if let Some(&cached) = self.packages.borrow().get(dir) {
            return cached;
        }
        self.fs_queries.set(self.fs_queries.get() + 1);
        let is_package = dir.join(PACKAGE_MARKER).is_file();
        self.packages.borrow_mut().insert(dir.to_path_buf(), is_package);
        is_package
    }

    /// Resolve `path` into `(qualified_name, containing_dir)`.
    ///
    /// ## Errors
    /// - [`ResolveError::NotPythonFile`]: `path` has an extension other than `.py`.
    /// - [`ResolveError::NotAPackage`]: `path` is a directory that is not a package.
    /// - [`ResolveError::Io`]: the current directory could not be determined.
    pub fn resolve(&self, path: &Path) -> Result<(String, PathBuf), ResolveError> {
        let path = std::path::absolute(path).map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension() {
            Some(ext) if ext != "py" => return Err(ResolveError::NotPythonFile { path }),
            None if path.is_dir() && !self.is_package(&path) => return Err(ResolveError::NotAPackage { path }),
            _ => {}
        }

        Ok(self.resolve_unchecked(&path))
    }

    fn resolve_unchecked(&self, path: &Path) -> (String, PathBuf) {
        if let Some(cached) = self.resolved.borrow().get(path) {
            return cached.clone();
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let result = match path.parent() {
            Some(parent) if self.is_package(parent) => {
                let (prefix, root) = self.resolve_unchecked(parent);
                (format!("{prefix}.{stem}"), root)
            }
            Some(parent) => (stem, parent.to_path_buf()),
            None => (stem, PathBuf::new()),
        };

        self.resolved.borrow_mut().insert(path.to_path_buf(), result.clone());
        result
    }

    /// Number of directories whose package status was read from disk so far.
    pub fn fs_queries(&self) -> usize {
        self.fs_queries.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cases() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/resolver")
    }

    fn resolve(relative: &str) -> Result<(String, PathBuf), ResolveError> {
        ModuleResolver::new().resolve(&cases().join(relative))
    }

    #[test]
    fn test_resolve_modules_and_packages() {
        let cases = cases();
        let expected = [
            ("outer.py", "outer", cases.clone()),
            ("scripts/inner.py", "inner", cases.join("scripts")),
            ("pkg/mod.py", "pkg.mod", cases.clone()),
            ("pkg/subpkg/submod.py", "pkg.subpkg.submod", cases.clone()),
            ("pkg/__init__.py", "pkg.__init__", cases.clone()),
            ("pkg", "pkg", cases.clone()),
            ("pkg/subpkg", "pkg.subpkg", cases.clone()),
        ];
        for (path, name, root) in expected {
            let (qualified, containing) = resolve(path).unwrap();
            assert_eq!(qualified, name, "{path}");
            assert_eq!(containing, root, "{path}");
        }
    }

    #[test]
    fn test_resolve_rejects_non_modules() {
        assert!(matches!(resolve("empty"), Err(ResolveError::NotAPackage { .. })));
        assert!(matches!(resolve("config.yml"), Err(ResolveError::NotPythonFile { .. })));
        assert!(matches!(resolve("pkg/py.typed"), Err(ResolveError::NotPythonFile { .. })));
    }

    #[test]
    fn test_package_checks_are_cached() {
        let resolver = ModuleResolver::new();
        let subpkg = cases().join("pkg/subpkg");

        resolver.resolve(&subpkg.join("submod.py")).unwrap();
        assert_eq!(resolver.fs_queries(), 3);

        // Need not exist: only its directories are inspected.
        resolver.resolve(&subpkg.join("submod2.py")).unwrap();
        assert_eq!(resolver.fs_queries(), 3);
    }
}
