//! # ELIZA Simple Plugin
//!
//! A minimal keyword-table take on ELIZA. Each utterance is lowercased and
//! checked against an ordered list of keyword rules; the first rule that
//! matches supplies a canned answer. When nothing matches, the user's words
//! are echoed back as a question with pronouns reflected.
//!
//! ## Features
//!
//! - Ordered first-match-wins keyword rules (`contains`, `any`, `all`)
//! - Pronoun reflection (e.g., "my cat" → "your cat")
//! - Bundled canonical script, or a custom one loaded from JSON
//! - Stateless: the same input always yields the same response
//!
//! ## Example
//!
//! ```rust
//! use elizaos_plugin_eliza_simple::ElizaSimplePlugin;
//!
//! let eliza = ElizaSimplePlugin::new();
//! println!("{}", eliza.get_greeting());
//! assert_eq!(eliza.generate_response("I feel tired"), "Why do you feel that way?");
//! assert_eq!(
//!     eliza.generate_response("My cat is funny"),
//!     "Why do you say \"your cat is funny\"?"
//! );
//! ```

#![warn(missing_docs)]

pub mod actions;
pub mod chat;
pub mod config;
pub mod error;
pub mod interop;
pub mod providers;
pub mod reflection;
pub mod responder;
pub mod rules;
pub mod script;
pub mod types;

pub use config::ElizaSimpleConfig;
pub use error::{ElizaSimpleError, Result};
pub use reflection::{ReflectionMap, ReflectionMode, Reflector};
pub use responder::Responder;
pub use rules::{Predicate, Rule, RuleTable};
pub use script::ResponderScript;
pub use types::ChatTurn;

use lazy_static::lazy_static;
use tracing::info;

lazy_static! {
    static ref SCRIPT: ResponderScript =
        ResponderScript::bundled().expect("data/script.json must be valid");
    static ref PLUGIN: ElizaSimplePlugin =
        ElizaSimplePlugin::from_script(&SCRIPT, ReflectionMode::default())
            .expect("data/script.json must build a responder");
}

/// The ELIZA simple plugin.
///
/// Wraps an immutable [`Responder`] together with the script's greeting.
/// Cloning is cheap enough for per-host instances; nothing is shared mutably.
#[derive(Debug, Clone)]
pub struct ElizaSimplePlugin {
    responder: Responder,
    greeting: String,
}

impl Default for ElizaSimplePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl ElizaSimplePlugin {
    /// Creates a plugin with the bundled script and phrase reflection.
    pub fn new() -> Self {
        PLUGIN.clone()
    }

    /// Creates a plugin from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configured script cannot be read or does not validate.
    pub fn with_config(config: ElizaSimpleConfig) -> Result<Self> {
        let script = config.load_script()?;
        let plugin = Self::from_script(&script, config.reflection_mode)?;
        info!(
            rules = plugin.responder.rules().len(),
            reflection = %config.reflection_mode,
            "ELIZA simple plugin configured"
        );
        Ok(plugin)
    }

    /// Creates a plugin from an already-loaded script.
    pub fn from_script(script: &ResponderScript, mode: ReflectionMode) -> Result<Self> {
        Ok(Self {
            responder: Responder::from_script(script, mode)?,
            greeting: script.greeting.clone(),
        })
    }

    /// Generates a response to one user utterance.
    ///
    /// # Arguments
    ///
    /// * `input` - The user's input text
    ///
    /// # Returns
    ///
    /// The first matching rule's response, or the reflected fallback question.
    pub fn generate_response(&self, input: &str) -> String {
        self.responder.generate_response(input)
    }

    /// Generates a response and reports which rule produced it.
    pub fn respond(&self, input: &str) -> ChatTurn {
        self.responder.respond(input)
    }

    /// Reflects pronouns in `text`.
    pub fn reflect(&self, text: &str) -> String {
        self.responder.reflect(text)
    }

    /// Returns the opening line for a conversation.
    pub fn get_greeting(&self) -> String {
        self.greeting.clone()
    }

    /// The underlying responder.
    pub fn responder(&self) -> &Responder {
        &self.responder
    }
}

/// Generates a response using the shared bundled-script instance.
pub fn generate_response(input: &str) -> String {
    PLUGIN.generate_response(input)
}

/// Reflects pronouns using the bundled reflection table.
///
/// # Arguments
///
/// * `text` - The input text to reflect
///
/// # Returns
///
/// A new string with pronouns reflected
pub fn reflect(text: &str) -> String {
    PLUGIN.reflect(text)
}

/// Returns the bundled greeting message.
pub fn get_greeting() -> String {
    PLUGIN.get_greeting()
}
