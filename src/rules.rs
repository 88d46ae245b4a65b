//! Keyword rules and the ordered rule table.
//!
//! A rule pairs a keyword predicate with a canned response. The table is
//! evaluated top to bottom against lowercased input and the first rule whose
//! predicate holds wins, so the order of the table is its priority.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ElizaSimpleError, Result};

/// Substring test over normalized (lowercased) input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Input contains the keyword.
    Contains(String),
    /// Input contains at least one of the keywords.
    Any(Vec<String>),
    /// Input contains every keyword.
    All(Vec<String>),
}

impl Predicate {
    /// Evaluates the predicate. `normalized` must already be lowercased.
    pub fn matches(&self, normalized: &str) -> bool {
        match self {
            Predicate::Contains(keyword) => normalized.contains(keyword.as_str()),
            Predicate::Any(keywords) => keywords.iter().any(|k| normalized.contains(k.as_str())),
            Predicate::All(keywords) => keywords.iter().all(|k| normalized.contains(k.as_str())),
        }
    }

    /// Keywords referenced by this predicate, in declaration order.
    pub fn keywords(&self) -> &[String] {
        match self {
            Predicate::Contains(keyword) => std::slice::from_ref(keyword),
            Predicate::Any(keywords) | Predicate::All(keywords) => keywords,
        }
    }

    fn lowercased(&self) -> Self {
        let lower = |ks: &[String]| ks.iter().map(|k| k.to_lowercase()).collect::<Vec<_>>();
        match self {
            Predicate::Contains(keyword) => Predicate::Contains(keyword.to_lowercase()),
            Predicate::Any(keywords) => Predicate::Any(lower(keywords)),
            Predicate::All(keywords) => Predicate::All(lower(keywords)),
        }
    }
}

/// A named (predicate, response) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable identifier used in logs and interop results
    pub name: String,
    /// Keyword test
    pub when: Predicate,
    /// Canned response returned verbatim
    pub response: String,
}

impl Rule {
    /// Creates a rule.
    pub fn new(name: impl Into<String>, when: Predicate, response: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            when,
            response: response.into(),
        }
    }

    /// Whether the rule fires for already-normalized input.
    pub fn matches(&self, normalized: &str) -> bool {
        self.when.matches(normalized)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ElizaSimpleError::InvalidScript(
                "rule name cannot be empty".to_string(),
            ));
        }
        if self.response.trim().is_empty() {
            return Err(ElizaSimpleError::InvalidScript(format!(
                "rule '{}' has an empty response",
                self.name
            )));
        }
        let keywords = self.when.keywords();
        if keywords.is_empty() {
            return Err(ElizaSimpleError::InvalidScript(format!(
                "rule '{}' has no keywords",
                self.name
            )));
        }
        // An empty keyword is a substring of every input and would swallow the fallback.
        if keywords.iter().any(|k| k.is_empty()) {
            return Err(ElizaSimpleError::InvalidScript(format!(
                "rule '{}' has an empty keyword",
                self.name
            )));
        }
        Ok(())
    }
}

/// Ordered, immutable list of rules evaluated first-match-wins.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Builds a table, validating every rule and lowercasing keywords.
    ///
    /// # Errors
    ///
    /// Returns `ElizaSimpleError::InvalidScript` for unnamed rules, duplicate
    /// names, empty responses, or empty keyword lists/keywords.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            rule.validate()?;
            if !seen.insert(rule.name.clone()) {
                return Err(ElizaSimpleError::InvalidScript(format!(
                    "duplicate rule name '{}'",
                    rule.name
                )));
            }
            compiled.push(Rule {
                when: rule.when.lowercased(),
                ..rule
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Returns the highest-priority rule matching `normalized`.
    pub fn find(&self, normalized: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.matches(normalized))
    }

    /// Looks a rule up by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Position of the named rule in priority order (0 is highest).
    pub fn priority_of(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.name == name)
    }

    /// All rules in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_predicate_semantics() {
        assert!(Predicate::Contains("i feel".into()).matches("well, i feel odd"));
        assert!(!Predicate::Contains("i feel".into()).matches("i felt odd"));

        let any = Predicate::Any(kw(&["thanks", "thank you"]));
        assert!(any.matches("thanks a lot"));
        assert!(!any.matches("cheers"));

        let all = Predicate::All(kw(&["why", "can't"]));
        assert!(all.matches("why can't i sleep"));
        assert!(!all.matches("why not"));
    }

    #[test]
    fn test_first_match_wins() {
        let table = RuleTable::new(vec![
            Rule::new("broad", Predicate::Contains("you".into()), "broad"),
            Rule::new("narrow", Predicate::Contains("who are you".into()), "narrow"),
        ])
        .unwrap();
        assert_eq!(table.find("who are you").unwrap().name, "broad");
        assert!(table.find("nothing here").is_none());
        assert_eq!(table.priority_of("narrow"), Some(1));
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let table = RuleTable::new(vec![Rule::new(
            "shout",
            Predicate::Any(kw(&["HELLO"])),
            "hi",
        )])
        .unwrap();
        assert_eq!(table.rules()[0].when.keywords(), &["hello".to_string()]);
        assert!(table.find("hello").is_some());
    }

    #[test]
    fn test_rejects_invalid_rules() {
        let empty_keyword = RuleTable::new(vec![Rule::new(
            "bad",
            Predicate::Contains(String::new()),
            "x",
        )]);
        assert!(matches!(
            empty_keyword,
            Err(ElizaSimpleError::InvalidScript(_))
        ));

        let empty_list = RuleTable::new(vec![Rule::new("bad", Predicate::All(vec![]), "x")]);
        assert!(empty_list.is_err());

        let empty_response =
            RuleTable::new(vec![Rule::new("bad", Predicate::Contains("x".into()), " ")]);
        assert!(empty_response.is_err());

        let duplicate = RuleTable::new(vec![
            Rule::new("dup", Predicate::Contains("a".into()), "a"),
            Rule::new("dup", Predicate::Contains("b".into()), "b"),
        ]);
        let err = duplicate.unwrap_err();
        assert!(err.to_string().contains("duplicate rule name 'dup'"));
    }

    #[test]
    fn test_predicate_json_shape() {
        let p: Predicate = serde_json::from_str(r#"{"all": ["why", "can't"]}"#).unwrap();
        assert_eq!(p, Predicate::All(kw(&["why", "can't"])));
        let p: Predicate = serde_json::from_str(r#"{"contains": "i feel"}"#).unwrap();
        assert_eq!(p, Predicate::Contains("i feel".into()));
    }
}
