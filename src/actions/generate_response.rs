//! Generate response action for ELIZA Simple
//!
//! Answers with the first matching keyword rule, or echoes the input back
//! with pronouns reflected.

use super::{ActionExample, ActionResult};
use crate::ElizaSimplePlugin;

const EMPTY_INPUT_PROMPT: &str =
    "I need something to respond to. What would you like to talk about?";

/// Action to generate ELIZA responses from the keyword table.
pub struct GenerateResponseAction;

impl GenerateResponseAction {
    /// Returns the action name.
    pub fn name(&self) -> &'static str {
        "generate-response"
    }

    /// Returns action aliases.
    pub fn similes(&self) -> Vec<&'static str> {
        vec!["ELIZA_RESPOND", "ELIZA_CHAT", "SIMPLE_ELIZA"]
    }

    /// Returns the action description.
    pub fn description(&self) -> &'static str {
        "Generate an ELIZA response for user input using keyword matching and pronoun reflection."
    }

    /// Validates whether this action should handle the message.
    pub fn validate(&self, _message_text: &str) -> bool {
        true
    }

    /// Handles the action with the shared bundled-script plugin.
    pub fn handler(&self, user_input: &str) -> ActionResult {
        self.handle_with(&ElizaSimplePlugin::new(), user_input)
    }

    /// Handles the action with a specific plugin instance.
    pub fn handle_with(&self, plugin: &ElizaSimplePlugin, user_input: &str) -> ActionResult {
        let message = user_input.trim();
        if message.is_empty() {
            return ActionResult::rejected(EMPTY_INPUT_PROMPT, "No user input provided");
        }

        ActionResult::replied(plugin.respond(message))
    }

    /// Returns action examples.
    pub fn examples(&self) -> Vec<ActionExample> {
        vec![
            ActionExample {
                input: "I feel tired",
                output: "Why do you feel that way?",
            },
            ActionExample {
                input: "My cat is funny",
                output: "Why do you say \"your cat is funny\"?",
            },
        ]
    }
}
