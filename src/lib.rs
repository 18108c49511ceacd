/// Handles argument parsing and the command workflow.
pub mod cli;

/// Configuration read from the template root.
pub mod config;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Template discovery and file generation.
pub mod generator;

/// Processes .scaffoldignore files and exclude patterns.
pub mod ignore;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Asks before existing files are overwritten or removed.
pub mod overwrite;

/// Confirmation prompts.
pub mod prompt;

/// Template rendering.
pub mod renderer;

pub use error::{Error, FileExists, Result};
pub use generator::{GenerateOptions, GeneratedFile, Generator, Outcome, TemplateFilter};
pub use overwrite::{GenerationReport, OverwriteController};
