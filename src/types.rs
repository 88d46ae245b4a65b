#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// One exchange: what the user said and what ELIZA answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub input: String,
    pub response: String,
    /// Name of the rule that fired, `None` for the reflected fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl ChatTurn {
    pub fn is_fallback(&self) -> bool {
        self.rule.is_none()
    }
}
