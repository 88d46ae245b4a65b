#![allow(missing_docs)]

use crate::actions::{self, GenerateResponseAction};
use crate::providers::{self, ElizaGreetingProvider};
use crate::{ElizaSimpleConfig, ElizaSimpleError, ElizaSimplePlugin, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub name: String,
    pub description: String,
    pub version: String,
    pub language: String,
    pub interop_protocols: Vec<String>,
    pub actions: Vec<ActionManifest>,
    pub providers: Vec<ProviderManifest>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionManifest {
    pub name: String,
    pub description: String,
    pub similes: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderManifest {
    pub name: String,
    pub description: String,
}

impl Default for PluginManifest {
    fn default() -> Self {
        Self {
            name: "eliza-simple".to_string(),
            description: "Keyword-table ELIZA with pronoun reflection - no LLM required"
                .to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            language: "rust".to_string(),
            interop_protocols: vec!["ipc".to_string()],
            actions: actions::get_actions()
                .iter()
                .map(|action| ActionManifest {
                    name: action.name().to_string(),
                    description: action.description().to_string(),
                    similes: action.similes().into_iter().map(String::from).collect(),
                })
                .collect(),
            providers: providers::get_providers()
                .iter()
                .map(|provider| ProviderManifest {
                    name: provider.name().to_string(),
                    description: provider.description().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, serde_json::Value>>,
}

impl ActionResult {
    pub fn failure(error: &str) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(error.to_string()),
            data: None,
        }
    }
}

impl From<actions::ActionResult> for ActionResult {
    fn from(result: actions::ActionResult) -> Self {
        let data = result.success.then(|| {
            let rule = result
                .rule
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null);
            HashMap::from([("rule".to_string(), rule)])
        });
        Self {
            success: result.success,
            text: result.text,
            error: result.error,
            data,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, serde_json::Value>>,
}

impl From<providers::ProviderResult> for ProviderResult {
    fn from(result: providers::ProviderResult) -> Self {
        Self {
            text: Some(result.text),
            values: Some(result.values.into_iter().collect()),
            data: Some(result.data.into_iter().collect()),
        }
    }
}

lazy_static! {
    static ref PLUGIN_INSTANCE: RwLock<ElizaSimplePlugin> = RwLock::new(ElizaSimplePlugin::new());
    static ref SPEAKER_LINE: Regex =
        Regex::new(r"(?im)^\s*(?:User|Human|You):\s*(.+?)$").expect("regex ok");
}

pub fn get_manifest_json() -> String {
    serde_json::to_string(&PluginManifest::default())
        .unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

/// Rebuilds the shared instance from a JSON `ElizaSimpleConfig`.
/// Empty, `null` and `{}` keep the current instance.
pub fn init_plugin(config_json: &str) -> Result<()> {
    let trimmed = config_json.trim();
    if trimmed.is_empty() || trimmed == "null" || trimmed == "{}" {
        return Ok(());
    }
    let config: ElizaSimpleConfig = serde_json::from_str(trimmed)?;
    let plugin = ElizaSimplePlugin::with_config(config)?;
    let mut instance = PLUGIN_INSTANCE
        .write()
        .map_err(|e| ElizaSimpleError::ConfigError(e.to_string()))?;
    *instance = plugin;
    Ok(())
}

pub fn validate_action(name: &str, _memory_json: &str, _state_json: &str) -> bool {
    name == GenerateResponseAction.name()
}

pub fn invoke_action(
    name: &str,
    memory_json: &str,
    _state_json: &str,
    options_json: &str,
) -> ActionResult {
    let action = GenerateResponseAction;
    if name != action.name() {
        return ActionResult::failure(&format!("Unknown action: {}", name));
    }

    let input = extract_user_input(memory_json, options_json);

    let instance = match PLUGIN_INSTANCE.read() {
        Ok(i) => i,
        Err(e) => return ActionResult::failure(&e.to_string()),
    };

    action.handle_with(&instance, &input).into()
}

pub fn get_provider(name: &str, _memory_json: &str, _state_json: &str) -> ProviderResult {
    let provider = ElizaGreetingProvider;
    if name != provider.name() {
        return ProviderResult::default();
    }
    match PLUGIN_INSTANCE.read() {
        Ok(instance) => provider.get_with(&instance).into(),
        Err(_) => ProviderResult::default(),
    }
}

/// Pulls the first line starting with `User:`, `Human:` or `You:` out of a
/// prompt, or the whole prompt trimmed when there is no such line. A speaker
/// label in the middle of a sentence is part of the message.
pub fn extract_user_message(prompt: &str) -> String {
    SPEAKER_LINE
        .captures(prompt)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| prompt.trim().to_string())
}

fn extract_user_input(memory_json: &str, options_json: &str) -> String {
    if let Ok(options) = serde_json::from_str::<serde_json::Value>(options_json) {
        for key in ["input", "prompt", "text"] {
            if let Some(text) = options.get(key).and_then(|v| v.as_str()) {
                return extract_user_message(text);
            }
        }
    }

    if let Ok(memory) = serde_json::from_str::<serde_json::Value>(memory_json) {
        if let Some(text) = memory
            .get("content")
            .and_then(|c| c.get("text"))
            .and_then(|v| v.as_str())
        {
            return extract_user_message(text);
        }
    }

    String::new()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcRequest {
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcResponse {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IpcResponse {
    pub fn success(id: u64, result: serde_json::Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: u64, error: &str) -> Self {
        Self {
            id,
            result: None,
            error: Some(error.to_string()),
        }
    }

    fn from_serializable<T: Serialize>(id: u64, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self::success(id, v),
            Err(e) => Self::error(id, &e.to_string()),
        }
    }
}

fn param_str<'a>(params: &'a serde_json::Value, key: &str) -> &'a str {
    params.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn param_json(params: &serde_json::Value, key: &str, default: &str) -> String {
    params
        .get(key)
        .map(|v| v.to_string())
        .unwrap_or_else(|| default.to_string())
}

pub fn handle_ipc_request(request: &IpcRequest) -> IpcResponse {
    let params = &request.params;
    match request.method.as_str() {
        "getManifest" => IpcResponse::from_serializable(request.id, &PluginManifest::default()),
        "init" => match init_plugin(&param_json(params, "config", "{}")) {
            Ok(()) => IpcResponse::success(request.id, serde_json::json!({"initialized": true})),
            Err(e) => IpcResponse::error(request.id, &e.to_string()),
        },
        "validateAction" => {
            let valid = validate_action(
                param_str(params, "name"),
                &param_json(params, "memory", ""),
                &param_json(params, "state", ""),
            );
            IpcResponse::success(request.id, serde_json::json!({"valid": valid}))
        }
        "invokeAction" => {
            let result = invoke_action(
                param_str(params, "name"),
                &param_json(params, "memory", ""),
                &param_json(params, "state", ""),
                &param_json(params, "options", "{}"),
            );
            IpcResponse::from_serializable(request.id, &result)
        }
        "getProvider" => {
            let result = get_provider(
                param_str(params, "name"),
                &param_json(params, "memory", ""),
                &param_json(params, "state", ""),
            );
            IpcResponse::from_serializable(request.id, &result)
        }
        "generateResponse" => {
            let turn = match PLUGIN_INSTANCE.read() {
                Ok(instance) => instance.respond(param_str(params, "input")),
                Err(e) => return IpcResponse::error(request.id, &e.to_string()),
            };
            IpcResponse::success(
                request.id,
                serde_json::json!({"response": turn.response, "rule": turn.rule}),
            )
        }
        "reflect" => {
            let reflected = match PLUGIN_INSTANCE.read() {
                Ok(instance) => instance.reflect(param_str(params, "text")),
                Err(e) => return IpcResponse::error(request.id, &e.to_string()),
            };
            IpcResponse::success(request.id, serde_json::json!({"reflected": reflected}))
        }
        _ => IpcResponse::error(request.id, &format!("Unknown method: {}", request.method)),
    }
}
