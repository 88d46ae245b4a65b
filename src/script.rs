//! Responder script: greeting, fallback template, pronoun table and rules.
//!
//! The canonical script ships inside the crate as `data/script.json`.
//! Custom scripts use the same JSON shape.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ElizaSimpleError, Result};
use crate::rules::Rule;

/// Placeholder replaced by the reflected input in the fallback template.
pub const REFLECTED_PLACEHOLDER: &str = "{reflected}";

const BUNDLED_SCRIPT: &str = include_str!("../data/script.json");

/// Deserialized script data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderScript {
    /// Opening line offered by the greeting provider
    pub greeting: String,
    /// Question used when no rule matches; must contain `{reflected}`
    pub fallback_template: String,
    /// Pronoun table
    pub reflections: HashMap<String, String>,
    /// Rules in priority order
    pub rules: Vec<Rule>,
}

impl ResponderScript {
    /// The canonical script bundled with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_SCRIPT)
    }

    /// Parses and validates a script from JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        let script: ResponderScript = serde_json::from_str(raw)?;
        script.validate()?;
        Ok(script)
    }

    /// Reads a script file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let script = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            rules = script.rules.len(),
            "Loaded custom responder script"
        );
        Ok(script)
    }

    /// Checks script-level invariants. Rule-level checks happen when the
    /// rule table is built.
    pub fn validate(&self) -> Result<()> {
        if !self.fallback_template.contains(REFLECTED_PLACEHOLDER) {
            return Err(ElizaSimpleError::InvalidScript(format!(
                "fallback template must contain {}",
                REFLECTED_PLACEHOLDER
            )));
        }
        if self.greeting.trim().is_empty() {
            return Err(ElizaSimpleError::InvalidScript(
                "greeting cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Predicate;

    #[test]
    fn test_bundled_script_integrity() {
        let script = ResponderScript::bundled().unwrap();
        assert_eq!(script.greeting, "Hello! How can I help you today?");
        assert_eq!(script.reflections.len(), 6);
        assert_eq!(script.rules.len(), 30);
        assert_eq!(script.rules[0].name, "greeting");
        assert_eq!(script.rules[29].name, "dreaming");
        assert_eq!(script.fallback_template, "Why do you say \"{reflected}\"?");
    }

    #[test]
    fn test_bundled_rule_order() {
        let script = ResponderScript::bundled().unwrap();
        let names: Vec<&str> = script.rules.iter().map(|r| r.name.as_str()).collect();
        let pos = |n: &str| names.iter().position(|x| *x == n).unwrap();
        assert!(pos("greeting") < pos("i-feel"));
        assert!(pos("i-feel") < pos("because"));
        assert!(pos("because") < pos("yes"));
        assert!(pos("yes") < pos("no"));
        assert!(pos("no") < pos("you"));
        assert!(pos("you") < pos("identity"));
        assert!(pos("need") < pos("why-cant"));
    }

    #[test]
    fn test_why_cant_is_conjunction() {
        let script = ResponderScript::bundled().unwrap();
        let rule = script.rules.iter().find(|r| r.name == "why-cant").unwrap();
        assert_eq!(
            rule.when,
            Predicate::All(vec!["why".to_string(), "can't".to_string()])
        );
    }

    #[test]
    fn test_dreaming_response_text() {
        let script = ResponderScript::bundled().unwrap();
        let rule = script.rules.iter().find(|r| r.name == "dreaming").unwrap();
        assert_eq!(
            rule.response,
            "I don't dream, but I\u{2019}m always here to listen to yours."
        );
    }

    #[test]
    fn test_rejects_template_without_placeholder() {
        let raw = r#"{
            "greeting": "hi",
            "fallback_template": "Tell me more.",
            "reflections": {},
            "rules": []
        }"#;
        let err = ResponderScript::from_json(raw).unwrap_err();
        assert!(matches!(err, ElizaSimpleError::InvalidScript(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ResponderScript::from_json("{\"greeting\": 1").unwrap_err();
        assert!(matches!(err, ElizaSimpleError::SerializationError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ResponderScript::from_path("/nonexistent/script.json").unwrap_err();
        assert!(matches!(err, ElizaSimpleError::Io(_)));
    }
}
