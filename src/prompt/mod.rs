//! Confirmation prompts
//!
//! The module is structured in layers:
//! - `interface`: the abstract [`Confirmer`] capability plus non-interactive answers
//! - `dialoguer`: concrete terminal implementation using the dialoguer library

pub mod dialoguer;
pub mod interface;

pub use self::dialoguer::DialoguerConfirmer;
pub use interface::{AutoConfirm, Confirmer};

/// Message shown when `destination_path` would be overwritten.
pub fn overwrite_message(destination_path: &std::path::Path) -> String {
    format!("{} already exists. Overwrite it?", destination_path.display())
}
