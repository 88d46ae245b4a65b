//! ELIZA Greeting Provider
//!
//! Provides the opening line of a conversation.

use serde_json::{Map, Value};

use super::ProviderResult;
use crate::ElizaSimplePlugin;

/// Provider for the ELIZA greeting message.
pub struct ElizaGreetingProvider;

impl ElizaGreetingProvider {
    /// Returns the provider name.
    pub fn name(&self) -> &'static str {
        "eliza-greeting"
    }

    /// Returns the provider description.
    pub fn description(&self) -> &'static str {
        "Provides the ELIZA greeting message."
    }

    /// Greeting from the shared bundled-script plugin.
    pub fn get(&self) -> ProviderResult {
        self.get_with(&ElizaSimplePlugin::new())
    }

    /// Greeting from a specific plugin instance, plus the size of its rule table.
    pub fn get_with(&self, plugin: &ElizaSimplePlugin) -> ProviderResult {
        let greeting = plugin.get_greeting();

        let mut values = Map::new();
        values.insert("greeting".to_string(), Value::String(greeting.clone()));

        let mut data = values.clone();
        data.insert(
            "rules".to_string(),
            Value::from(plugin.responder().rules().len()),
        );
        data.insert(
            "reflectionMode".to_string(),
            Value::String(plugin.responder().reflector().mode().to_string()),
        );

        ProviderResult {
            text: greeting,
            values,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElizaSimpleConfig, ReflectionMode};

    #[test]
    fn test_eliza_greeting_provider() {
        let result = ElizaGreetingProvider.get();

        assert_eq!(result.text, "Hello! How can I help you today?");
        assert_eq!(result.values["greeting"], result.text.as_str());
        assert_eq!(result.data["rules"], 30);
        assert_eq!(result.data["reflectionMode"], "phrase");
    }

    #[test]
    fn test_reports_configured_instance() {
        let config = ElizaSimpleConfig::default().with_reflection_mode(ReflectionMode::Word);
        let plugin = ElizaSimplePlugin::with_config(config).unwrap();
        let result = ElizaGreetingProvider.get_with(&plugin);
        assert_eq!(result.data["reflectionMode"], "word");
    }

    #[test]
    fn test_provider_metadata() {
        let provider = ElizaGreetingProvider;
        assert_eq!(provider.name(), "eliza-greeting");
        assert!(provider.description().contains("greeting"));
    }
}
