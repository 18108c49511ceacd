use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use log::LevelFilter;
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// What to do when a destination file already exists.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq, Default, Serialize)]
#[value(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Ask for every existing file.
    #[default]
    Ask,
    /// Overwrite without asking.
    Always,
    /// Keep every existing file.
    Never,
}

impl Display for OverwritePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OverwritePolicy::Ask => "ask",
            OverwritePolicy::Always => "always",
            OverwritePolicy::Never => "never",
        };
        write!(f, "{s}")
    }
}

/// CLI arguments for scaffold.
///
/// The parsed arguments double as the template context.
#[derive(Parser, Debug, Clone, Serialize)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The directory where all your templates live.
    #[arg(short = 't', long = "template-dir", alias = "templateDir", value_name = "DIR")]
    pub template_dir: PathBuf,

    /// The directory where to generate files.
    #[arg(short = 'o', long = "destination-dir", alias = "destinationDir", value_name = "DIR")]
    pub destination_dir: PathBuf,

    /// Extension removed from template names, first match wins (repeatable).
    #[arg(short = 'e', long = "template-extension", value_name = "EXT")]
    pub template_extensions: Vec<String>,

    /// Only generate these template names (repeatable).
    #[arg(long, value_name = "TEMPLATE_NAME")]
    pub only: Vec<String>,

    /// Glob of template names to skip (repeatable).
    #[arg(short = 'x', long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Extra context as a JSON object, or `-` to read it from stdin.
    #[arg(short, long)]
    pub answers: Option<String>,

    /// What to do with destination files that already exist.
    #[arg(long, value_enum, default_value_t = OverwritePolicy::Ask)]
    pub overwrite: OverwritePolicy,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
