//! ELIZA simple plugin configuration
//!
//! Configuration can be loaded from environment variables or constructed programmatically.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::reflection::ReflectionMode;
use crate::script::ResponderScript;

/// Plugin configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElizaSimpleConfig {
    /// Tokenization used when reflecting pronouns
    pub reflection_mode: ReflectionMode,

    /// Custom script file; the bundled script is used when unset
    pub script_path: Option<PathBuf>,
}

impl ElizaSimpleConfig {
    /// Load configuration from environment variables.
    ///
    /// # Optional Variables
    ///
    /// - `ELIZA_REFLECTION_MODE`: `phrase` (default) or `word`
    /// - `ELIZA_SCRIPT_PATH`: path to a custom script JSON file
    ///
    /// An unrecognized reflection mode is logged and ignored.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let reflection_mode = match std::env::var("ELIZA_REFLECTION_MODE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring ELIZA_REFLECTION_MODE: {}", e);
                ReflectionMode::default()
            }),
            Err(_) => ReflectionMode::default(),
        };

        Self {
            reflection_mode,
            script_path: std::env::var("ELIZA_SCRIPT_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Set reflection mode (builder pattern)
    pub fn with_reflection_mode(mut self, mode: ReflectionMode) -> Self {
        self.reflection_mode = mode;
        self
    }

    /// Set custom script path (builder pattern)
    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = Some(path.into());
        self
    }

    /// Loads the script this configuration points at.
    pub fn load_script(&self) -> Result<ResponderScript> {
        match &self.script_path {
            Some(path) => ResponderScript::from_path(path),
            None => ResponderScript::bundled(),
        }
    }
}
