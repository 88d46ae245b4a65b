//! Chat transcript for interactive front ends.
//!
//! A host reads raw lines, hands them to [`Transcript::submit`] and renders
//! the resulting `You:` / `ELIZA:` lines. The transcript is display history
//! only. The responder never sees earlier turns.

use crate::types::ChatTurn;
use crate::ElizaSimplePlugin;

/// Speaker label for user lines.
pub const USER_LABEL: &str = "You";
/// Speaker label for ELIZA lines.
pub const ELIZA_LABEL: &str = "ELIZA";

/// Ordered record of the turns in one chat window.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims `raw`, asks the plugin for a response and records the turn.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn submit(&mut self, plugin: &ElizaSimplePlugin, raw: &str) -> Option<&ChatTurn> {
        let message = raw.trim();
        if message.is_empty() {
            return None;
        }
        self.turns.push(plugin.respond(message));
        self.turns.last()
    }

    /// Recorded turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of recorded turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drops all recorded turns.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Renders every turn as labelled display lines.
    pub fn lines(&self) -> Vec<String> {
        self.turns.iter().flat_map(render_turn).collect()
    }
}

/// Renders one turn as `[user line, eliza line]`.
pub fn render_turn(turn: &ChatTurn) -> [String; 2] {
    [
        format!("{}: {}", USER_LABEL, turn.input),
        format!("{}: {}", ELIZA_LABEL, turn.response),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_ignored() {
        let plugin = ElizaSimplePlugin::new();
        let mut transcript = Transcript::new();
        assert!(transcript.submit(&plugin, "").is_none());
        assert!(transcript.submit(&plugin, "   \t").is_none());
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_input_is_trimmed() {
        let plugin = ElizaSimplePlugin::new();
        let mut transcript = Transcript::new();
        let turn = transcript.submit(&plugin, "  My cat is funny \n").unwrap();
        assert_eq!(turn.input, "My cat is funny");
        assert_eq!(turn.response, "Why do you say \"your cat is funny\"?");
    }

    #[test]
    fn test_lines() {
        let plugin = ElizaSimplePlugin::new();
        let mut transcript = Transcript::new();
        transcript.submit(&plugin, "Hello there");
        transcript.submit(&plugin, "I feel tired");
        assert_eq!(
            transcript.lines(),
            vec![
                "You: Hello there".to_string(),
                "ELIZA: Hello! How can I help you today?".to_string(),
                "You: I feel tired".to_string(),
                "ELIZA: Why do you feel that way?".to_string(),
            ]
        );
        transcript.clear();
        assert_eq!(transcript.len(), 0);
    }

    #[test]
    fn test_history_does_not_affect_responses() {
        let plugin = ElizaSimplePlugin::new();
        let mut transcript = Transcript::new();
        let first = transcript.submit(&plugin, "because").unwrap().response.clone();
        transcript.submit(&plugin, "I feel odd");
        let again = transcript.submit(&plugin, "because").unwrap().response.clone();
        assert_eq!(first, again);
    }
}
