use crate::constants::{CONFIG_FILENAMES, IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info};
use std::path::Path;

/// Default patterns to always ignore during template processing
const DEFAULT_IGNORE_PATTERNS: &[&str] =
    &[".git", ".git/**", ".hg/**", ".svn/**", "**/.DS_Store", IGNORE_FILE];

/// Builds the set of glob patterns excluded from generation.
///
/// Patterns are matched against template names, i.e. paths relative to the
/// template root. Sources, in order: the defaults, the config file names,
/// `extra_patterns`, and the lines of `.scaffoldignore` if present.
pub fn parse_ignore_file<P: AsRef<Path>>(
    template_root: P,
    extra_patterns: &[String],
) -> Result<GlobSet> {
    let ignore_path = template_root.as_ref().join(IGNORE_FILE);

    let mut patterns: Vec<String> = DEFAULT_IGNORE_PATTERNS
        .iter()
        .chain(CONFIG_FILENAMES)
        .map(|pattern| pattern.to_string())
        .collect();
    patterns.extend(extra_patterns.iter().cloned());

    match std::fs::read_to_string(&ignore_path) {
        Ok(contents) => patterns.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        ),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No {IGNORE_FILE} file found, using default patterns.");
        }
        Err(e) => return Err(Error::Io(e)),
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in &patterns {
        debug!("Adding ignore pattern: {pattern} to globset");
        builder.add(Glob::new(pattern)?);
    }
    info!("Loaded the following ignore patterns: {patterns:?}");
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn ignores_defaults_and_config_files() {
        let root = TempDir::new().unwrap();
        let ignored = parse_ignore_file(root.path(), &[]).unwrap();

        assert!(ignored.is_match(".git/HEAD"));
        assert!(ignored.is_match("nested/.DS_Store"));
        assert!(ignored.is_match("scaffold.yaml"));
        assert!(ignored.is_match(".scaffoldignore"));
        assert!(!ignored.is_match("src/index.js"));
    }

    #[test]
    fn reads_ignore_file_lines() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(IGNORE_FILE), "# comment\n\n  docs/**  \n*.log\n").unwrap();

        let ignored = parse_ignore_file(root.path(), &[]).unwrap();

        assert!(ignored.is_match("docs/intro.md"));
        assert!(ignored.is_match("build.log"));
        assert!(!ignored.is_match("# comment"));
        assert!(!ignored.is_match("README.md"));
    }

    #[test]
    fn extra_patterns_are_applied() {
        let root = TempDir::new().unwrap();
        let ignored = parse_ignore_file(root.path(), &["*.bak".to_string()]).unwrap();
        assert!(ignored.is_match("old.bak"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let root = TempDir::new().unwrap();
        let result = parse_ignore_file(root.path(), &["a[".to_string()]);
        assert!(matches!(result, Err(Error::GlobSetParseError(_))));
    }
}
