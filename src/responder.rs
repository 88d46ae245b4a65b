//! Rule evaluation and the reflected fallback.

use tracing::debug;

use crate::error::{ElizaSimpleError, Result};
use crate::reflection::{ReflectionMap, ReflectionMode, Reflector};
use crate::rules::{Rule, RuleTable};
use crate::script::{ResponderScript, REFLECTED_PLACEHOLDER};
use crate::types::ChatTurn;

/// Lowercases input for keyword matching.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Stateless keyword responder.
///
/// Holds only immutable tables, so one instance can serve any number of
/// callers without locking.
#[derive(Debug, Clone)]
pub struct Responder {
    rules: RuleTable,
    reflector: Reflector,
    fallback_template: String,
}

impl Responder {
    /// Creates a responder from prebuilt parts.
    ///
    /// # Errors
    ///
    /// Returns `ElizaSimpleError::InvalidScript` if `fallback_template` lacks
    /// the `{reflected}` placeholder.
    pub fn new(
        rules: RuleTable,
        reflector: Reflector,
        fallback_template: impl Into<String>,
    ) -> Result<Self> {
        let fallback_template = fallback_template.into();
        if !fallback_template.contains(REFLECTED_PLACEHOLDER) {
            return Err(ElizaSimpleError::InvalidScript(format!(
                "fallback template must contain {}",
                REFLECTED_PLACEHOLDER
            )));
        }
        Ok(Self {
            rules,
            reflector,
            fallback_template,
        })
    }

    /// Builds a responder from script data.
    pub fn from_script(script: &ResponderScript, mode: ReflectionMode) -> Result<Self> {
        let rules = RuleTable::new(script.rules.clone())?;
        let map = ReflectionMap::new(&script.reflections)?;
        Self::new(
            rules,
            Reflector::new(map, mode),
            script.fallback_template.clone(),
        )
    }

    /// The rule that would answer `text`, if any.
    pub fn classify(&self, text: &str) -> Option<&Rule> {
        self.rules.find(&normalize(text))
    }

    /// Produces a response for one utterance.
    pub fn generate_response(&self, text: &str) -> String {
        self.respond(text).response
    }

    /// Like [`Responder::generate_response`] but also reports the rule that fired.
    pub fn respond(&self, text: &str) -> ChatTurn {
        let (response, rule) = match self.classify(text) {
            Some(rule) => {
                debug!(rule = %rule.name, "Keyword rule matched");
                (rule.response.clone(), Some(rule.name.clone()))
            }
            None => {
                debug!("No keyword rule matched, reflecting input");
                (self.fallback(text), None)
            }
        };
        ChatTurn {
            input: text.to_string(),
            response,
            rule,
        }
    }

    /// Reflects pronouns in `text` with this responder's table.
    pub fn reflect(&self, text: &str) -> String {
        self.reflector.reflect(text)
    }

    /// The rule table in priority order.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// The reflector in use.
    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    fn fallback(&self, text: &str) -> String {
        // Reflection sees the caller's casing, not the normalized copy.
        let reflected = self.reflector.reflect(text);
        self.fallback_template
            .replacen(REFLECTED_PLACEHOLDER, &reflected, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Predicate;

    fn bundled(mode: ReflectionMode) -> Responder {
        Responder::from_script(&ResponderScript::bundled().unwrap(), mode).unwrap()
    }

    #[test]
    fn test_documented_scenarios() {
        let r = bundled(ReflectionMode::Phrase);
        assert_eq!(
            r.generate_response("Hello there"),
            "Hello! How can I help you today?"
        );
        assert_eq!(r.generate_response("I feel tired"), "Why do you feel that way?");
        assert_eq!(
            r.generate_response("My cat is funny"),
            "Why do you say \"your cat is funny\"?"
        );
        assert_eq!(r.generate_response(""), "Why do you say \"\"?");
    }

    #[test]
    fn test_case_insensitive_matching() {
        let r = bundled(ReflectionMode::Phrase);
        assert_eq!(r.generate_response("HELLO"), r.generate_response("hello"));
        assert_eq!(r.classify("I FEEL great").unwrap().name, "i-feel");
    }

    #[test]
    fn test_overlapping_keywords_resolve_by_order() {
        let r = bundled(ReflectionMode::Phrase);
        let turn = r.respond("yes, because I feel sad");
        assert_eq!(turn.rule.as_deref(), Some("i-feel"));
        assert_eq!(turn.response, "Why do you feel that way?");

        assert_eq!(r.classify("yes, because").unwrap().name, "because");
        // "who are you" also contains "you", which sits earlier in the table.
        assert_eq!(r.classify("who are you").unwrap().name, "you");
    }

    #[test]
    fn test_substring_matching_is_literal() {
        let r = bundled(ReflectionMode::Phrase);
        // "this" contains "hi"; "know" contains "no".
        assert_eq!(r.classify("this is odd").unwrap().name, "greeting");
        assert_eq!(r.classify("I know").unwrap().name, "no");
    }

    #[test]
    fn test_rules_after_you_still_reachable() {
        let r = bundled(ReflectionMode::Phrase);
        assert_eq!(r.generate_response("I need a break"), "Why do you need that?");
        assert_eq!(
            r.generate_response("why can't I sleep"),
            "What do you think is stopping you?"
        );
        assert_eq!(r.generate_response("thanks a lot"), "You're very welcome!");
        assert_eq!(
            r.generate_response("Goodbye"),
            "Goodbye! Feel free to come back if you need more help."
        );
    }

    #[test]
    fn test_fallback_keeps_caller_casing() {
        let r = bundled(ReflectionMode::Phrase);
        let turn = r.respond("Paris is my favourite City");
        assert!(turn.is_fallback());
        assert_eq!(
            turn.response,
            "Why do you say \"Paris is your favourite City\"?"
        );
    }

    #[test]
    fn test_reflection_mode_changes_fallback_only() {
        let phrase = bundled(ReflectionMode::Phrase);
        let word = bundled(ReflectionMode::Word);
        assert_eq!(
            phrase.generate_response("I am tired"),
            "Why do you say \"you are tired\"?"
        );
        assert_eq!(
            word.generate_response("I am tired"),
            "Why do you say \"you am tired\"?"
        );
        assert_eq!(phrase.generate_response("hey"), word.generate_response("hey"));
    }

    #[test]
    fn test_custom_parts() {
        let rules = RuleTable::new(vec![Rule::new(
            "weather",
            Predicate::Any(vec!["rain".into(), "snow".into()]),
            "Does the weather affect you?",
        )])
        .unwrap();
        let map = ReflectionMap::new([("my", "your")]).unwrap();
        let r = Responder::new(rules, Reflector::new(map, ReflectionMode::Word), "{reflected}?")
            .unwrap();
        assert_eq!(r.generate_response("Snow again"), "Does the weather affect you?");
        assert_eq!(r.generate_response("my day"), "your day?");
    }

    #[test]
    fn test_template_placeholder_required() {
        let err = Responder::new(RuleTable::default(), Reflector::default(), "Go on.").unwrap_err();
        assert!(matches!(err, ElizaSimpleError::InvalidScript(_)));
    }

    #[test]
    fn test_deterministic() {
        let r = bundled(ReflectionMode::Phrase);
        let input = "Something about my brother";
        assert_eq!(r.generate_response(input), r.generate_response(input));
    }
}
