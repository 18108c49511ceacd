//! Pure interfaces for confirmation without external dependencies

use crate::error::Result;

/// Answers yes/no questions, possibly by asking a human.
///
/// Errors are returned to the caller untouched.
pub trait Confirmer {
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

impl<F> Confirmer for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self(message)
    }
}

/// Gives the same answer to every question without prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        log::debug!("Answering '{}' to: {message}", if self.0 { "yes" } else { "no" });
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_confirm_answers_fixed_value() {
        assert!(AutoConfirm(true).confirm("Overwrite?").unwrap());
        assert!(!AutoConfirm(false).confirm("Overwrite?").unwrap());
    }

    #[test]
    fn closures_are_confirmers() {
        let mut asked = Vec::new();
        let mut confirmer = |message: &str| -> Result<bool> {
            asked.push(message.to_string());
            Ok(asked.len() == 1)
        };
        assert!(confirmer.confirm("first").unwrap());
        assert!(!confirmer.confirm("second").unwrap());
        drop(confirmer);
        assert_eq!(asked, vec!["first", "second"]);
    }
}
