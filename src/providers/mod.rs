//! ELIZA simple providers
//!
//! Providers expose read-only facts about the loaded script to the host,
//! such as the line a conversation opens with.

mod eliza_greeting;

pub use eliza_greeting::ElizaGreetingProvider;

use serde_json::{Map, Value};

/// What a provider hands back to the host.
#[derive(Debug, Clone)]
pub struct ProviderResult {
    /// Text to show or inject into a prompt
    pub text: String,
    /// Flat template values
    pub values: Map<String, Value>,
    /// Structured data about the script
    pub data: Map<String, Value>,
}

/// Returns all available providers.
pub fn get_providers() -> Vec<ElizaGreetingProvider> {
    vec![ElizaGreetingProvider]
}
