//! Non-interactive UI for pipes and scripts.

use tracing::debug;

use crate::error::Result;

use super::{Prompt, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Output is plain text. Every confirmation is declined, so nothing is
/// created on the user's behalf without a terminal to ask on.
#[derive(Debug, Default)]
pub struct NonInteractiveUI;

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new() -> Self {
        Self
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        debug!("Declining prompt '{}' (non-interactive)", prompt.key);
        Ok(false)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
