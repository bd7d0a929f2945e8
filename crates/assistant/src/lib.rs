//! Chat assistant relaying questions to a generative-language API.
//!
//! [`ChatRelay`] holds an ordered model list and tries each model until one
//! answers. [`ChatSession`] keeps the conversation shown by the frontend.
pub use client::GenerativeClient;
pub use error::{FailureKind, ModelError, ModelFailure, RelayError, SetupError};
pub use relay::{ChatRelay, CompletionBackend, prompt_for};
pub use session::{
    ChatMessage, ChatSession, GREETING, MISSING_KEY_MESSAGE, SUGGESTIONS, Sender, Submission,
};
pub use settings::{AssistantSettings, DEFAULT_BASE_URL, DEFAULT_MODELS};

mod client;
mod error;
mod relay;
mod session;
mod settings;

/// Builds the relay for the configured endpoint.
///
/// Returns `Ok(None)` when no API key is configured.
pub fn connect(
    settings: &AssistantSettings,
) -> Result<Option<ChatRelay<GenerativeClient>>, SetupError> {
    let Some(key) = settings.api_key() else {
        tracing::info!("no assistant API key configured");
        return Ok(None);
    };

    let client = GenerativeClient::new(&settings.base_url, key)?;
    tracing::info!(models = ?settings.models, "assistant relay ready");
    Ok(Some(ChatRelay::new(client, settings.models.clone())))
}
