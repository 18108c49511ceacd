//! A set of helpers for working with the file system.
//!
//! Generation talks to the disk only through [`FileSystem`], so tests and
//! embedders can swap in their own implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// The file system operations the generator relies on.
pub trait FileSystem {
    /// Lazily lists every non-directory entry below `root`, each path
    /// relative to `root`.
    ///
    /// The order is whatever the underlying walk produces.
    fn walk_files(&self, root: &Path) -> Box<dyn Iterator<Item = Result<PathBuf>> + '_>;

    /// `Ok(true)` if `path` exists, `Ok(false)` if it does not, and an error
    /// when the probe itself failed (e.g. permission denied).
    fn try_exists(&self, path: &Path) -> std::io::Result<bool>;

    /// Recursively creates `path`. Succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Creates or truncates `path` and writes `contents` to it.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    fn remove_file(&self, path: &Path) -> std::io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs` and `walkdir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem {
    sort_by_file_name: bool,
}

impl LocalFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// A local file system whose walks visit siblings sorted by file name,
    /// giving a reproducible discovery order.
    pub fn sorted() -> Self {
        Self {
            sort_by_file_name: true,
        }
    }
}

impl FileSystem for LocalFileSystem {
    fn walk_files(&self, root: &Path) -> Box<dyn Iterator<Item = Result<PathBuf>> + '_> {
        let root = root.to_path_buf();
        let mut walker = WalkDir::new(&root).min_depth(1);
        if self.sort_by_file_name {
            walker = walker.sort_by_file_name();
        }

        Box::new(walker.into_iter().filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) => Some(
                entry
                    .path()
                    .strip_prefix(&root)
                    .map(Path::to_path_buf)
                    .map_err(|e| Error::Io(std::io::Error::other(e))),
            ),
            Err(e) => Some(Err(Error::Walk(e))),
        }))
    }

    fn try_exists(&self, path: &Path) -> std::io::Result<bool> {
        match std::fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Joins a `/`-separated relative name onto `root`.
pub fn join_relative<P: AsRef<Path>>(root: P, name: &str) -> PathBuf {
    name.split('/').filter(|part| !part.is_empty()).fold(
        root.as_ref().to_path_buf(),
        |path, part| path.join(part),
    )
}

/// Turns a relative path into a `/`-separated name without a leading slash.
pub fn to_relative_name<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let parts = path
        .components()
        .map(|component| {
            component
                .as_os_str()
                .to_str()
                .ok_or_else(|| Error::InvalidUnicodePath {
                    path: path.to_path_buf(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join("/"))
}

pub fn parse_string_to_json(buf: String) -> Result<serde_json::Map<String, serde_json::Value>> {
    match serde_json::from_str(&buf)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Ok(serde_json::Map::new()),
    }
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn walk_files_skips_directories() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("src/nested")).unwrap();
        fs::write(root.path().join("README.md"), "readme").unwrap();
        fs::write(root.path().join("src/nested/lib.rs"), "").unwrap();

        let found: HashSet<PathBuf> = LocalFileSystem::new()
            .walk_files(root.path())
            .collect::<Result<_>>()
            .unwrap();

        let expected: HashSet<PathBuf> =
            [PathBuf::from("README.md"), PathBuf::from("src/nested/lib.rs")].into();
        assert_eq!(found, expected);
    }

    #[test]
    fn sorted_walk_is_ordered_by_file_name() {
        let root = TempDir::new().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(root.path().join(name), "").unwrap();
        }

        let found: Vec<PathBuf> = LocalFileSystem::sorted()
            .walk_files(root.path())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            found,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt"), PathBuf::from("c.txt")]
        );
    }

    #[test]
    fn walk_of_missing_root_yields_error() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("missing");
        let fs = LocalFileSystem::new();
        let mut walk = fs.walk_files(&missing);
        assert!(matches!(walk.next(), Some(Err(Error::Walk(_)))));
    }

    #[test]
    fn try_exists_is_tri_state() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("present.txt");
        fs::write(&file, "").unwrap();

        let fs = LocalFileSystem::new();
        assert!(fs.try_exists(&file).unwrap());
        assert!(!fs.try_exists(&root.path().join("absent.txt")).unwrap());
    }

    #[test]
    fn join_relative_uses_forward_slashes() {
        assert_eq!(
            join_relative("/templates", "src/index.js"),
            Path::new("/templates").join("src").join("index.js")
        );
    }

    #[test]
    fn relative_name_has_no_leading_slash() {
        let name = to_relative_name(Path::new("src").join("index.js")).unwrap();
        assert_eq!(name, "src/index.js");
    }

    #[test]
    fn parse_string_to_json_ignores_non_objects() {
        assert!(parse_string_to_json("[1, 2]".to_string()).unwrap().is_empty());
        let map = parse_string_to_json(r#"{"name": "demo"}"#.to_string()).unwrap();
        assert_eq!(map["name"], "demo");
    }

    #[test]
    fn parse_string_to_json_rejects_invalid_json() {
        assert!(matches!(
            parse_string_to_json("{".to_string()),
            Err(Error::AnswersError(_))
        ));
    }
}
