//! Dialoguer-based implementation of the confirmation interface

use super::interface::Confirmer;
use crate::error::Result;
use dialoguer::Confirm;

/// Asks on the terminal. Pressing enter picks `default`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerConfirmer {
    default: bool,
}

impl DialoguerConfirmer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(default: bool) -> Self {
        Self { default }
    }
}

impl Confirmer for DialoguerConfirmer {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        Ok(Confirm::new().with_prompt(message).default(self.default).interact()?)
    }
}
