//! ELIZA simple actions
//!
//! The only action turns one user utterance into one ELIZA reply.

mod generate_response;

pub use generate_response::GenerateResponseAction;

use crate::types::ChatTurn;

/// Outcome of running an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    /// Whether a reply was produced
    pub success: bool,
    /// Reply text, or a prompt asking for input when nothing was given
    pub text: Option<String>,
    /// Rule that produced the reply, `None` for the reflected fallback
    pub rule: Option<String>,
    /// Error message if failed
    pub error: Option<String>,
}

impl ActionResult {
    /// A successful reply.
    pub fn replied(turn: ChatTurn) -> Self {
        Self {
            success: true,
            text: Some(turn.response),
            rule: turn.rule,
            error: None,
        }
    }

    /// A refusal that still carries text the host can show.
    pub fn rejected(prompt: &str, error: &str) -> Self {
        Self {
            success: false,
            text: Some(prompt.to_string()),
            rule: None,
            error: Some(error.to_string()),
        }
    }
}

/// Input/reply pair shown in action docs.
#[derive(Debug, Clone, Copy)]
pub struct ActionExample {
    /// What the user says
    pub input: &'static str,
    /// What ELIZA answers
    pub output: &'static str,
}

/// Returns all available actions.
pub fn get_actions() -> Vec<GenerateResponseAction> {
    vec![GenerateResponseAction]
}
