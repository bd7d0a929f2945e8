use std::fmt;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODELS: [&str; 2] = ["gemini-1.5-flash", "gemini-pro"];

/// `[assistant]` section of the configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AssistantSettings {
    pub base_url: String,
    /// Models tried in order until one answers.
    pub models: Vec<String>,
    pub api_key: Option<String>,
}

impl AssistantSettings {
    /// The key, unless it is missing or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            api_key: None,
        }
    }
}

impl fmt::Debug for AssistantSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantSettings")
            .field("base_url", &self.base_url)
            .field("models", &self.models)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
