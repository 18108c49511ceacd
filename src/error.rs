use std::path::PathBuf;
use thiserror::Error;

/// A destination file that already exists while overwriting was not forced.
///
/// Carries everything a caller needs to retry the same generation with
/// `force` set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The file \"{}\" already exists", destination_path.display())]
pub struct FileExists {
    /// The name of the file found in the template directory.
    ///
    /// If the template directory is `_templates` and inside is a file called
    /// `package.json.j2`, then the template name is simply `package.json.j2`.
    pub template_name: String,

    /// The name used when generating inside the destination directory.
    ///
    /// Usually the template name with its template extension removed.
    pub file_name: String,

    /// The full path of the file that would have been written.
    pub destination_path: PathBuf,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    FileExists(#[from] FileExists),

    #[error("Cannot read template '{}'. Original error: {source}", path.display())]
    TemplateRead { path: PathBuf, source: std::io::Error },

    #[error("Cannot write '{}'. Original error: {source}", path.display())]
    DestinationWrite { path: PathBuf, source: std::io::Error },

    /// Probing the destination failed for a reason other than "not found".
    #[error("Cannot check whether '{}' exists. Original error: {source}", path.display())]
    ExistenceCheck { path: PathBuf, source: std::io::Error },

    #[error("Cannot remove '{}'. Original error: {source}", path.display())]
    RemoveFile { path: PathBuf, source: std::io::Error },

    #[error("Path '{}' contains invalid Unicode characters.", path.display())]
    InvalidUnicodePath { path: PathBuf },

    #[error("Failed to walk the template directory. Original error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to render template: {0}.")]
    Render(String),

    #[error("Confirmation prompt failed. Original error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("IO error: {0}.")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file '{path}'. Original error: {e}")]
    ConfigParseError { path: String, e: String },

    #[error("Failed to parse ignore patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to parse answers. Original error: {0}")]
    AnswersError(#[from] serde_json::Error),

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },
}

impl Error {
    /// Whether this is the recoverable "destination already exists" case.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::FileExists(_))
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_exists_message_names_destination() {
        let err = FileExists {
            template_name: "package.json.mustache".to_string(),
            file_name: "package.json".to_string(),
            destination_path: PathBuf::from("/out/package.json"),
        };
        assert_eq!(err.to_string(), "The file \"/out/package.json\" already exists");
    }

    #[test]
    fn only_file_exists_is_a_conflict() {
        let conflict: Error = FileExists {
            template_name: "a".to_string(),
            file_name: "a".to_string(),
            destination_path: PathBuf::from("/out/a"),
        }
        .into();
        assert!(conflict.is_conflict());

        let probe = Error::ExistenceCheck {
            path: PathBuf::from("/out/a"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!probe.is_conflict());
    }
}
