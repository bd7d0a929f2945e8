use thiserror::Error;

/// Failure of a single `generateContent` attempt against one model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("[429] {0}")]
    RateLimited(String),
    #[error("[404] {0}")]
    NotFound(String),
    #[error("API key not valid: {0}")]
    InvalidKey(String),
    #[error("[{status}] {message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response carried no text")]
    EmptyResponse,
}

impl ModelError {
    /// Maps a non-2xx status and its error message to a variant.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => Self::RateLimited(message),
            404 => Self::NotFound(message),
            401 => Self::InvalidKey(message),
            400 | 403 if message.contains("API key") => Self::InvalidKey(message),
            _ => Self::Server { status, message },
        }
    }
}

/// Error raised while building the HTTP client.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
    #[error("API key contains characters not allowed in a header")]
    InvalidApiKey,
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Every configured model failed.
#[derive(Debug, Error)]
#[error("all models failed: {}", describe(.failures))]
pub struct RelayError {
    pub failures: Vec<ModelFailure>,
}

#[derive(Debug)]
pub struct ModelFailure {
    pub model: String,
    pub error: ModelError,
}

fn describe(failures: &[ModelFailure]) -> String {
    if failures.is_empty() {
        return "no model configured".to_string();
    }
    failures
        .iter()
        .map(|f| format!("{}: {}", f.model, f.error))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// User-facing category of an aggregated failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    ModelUnavailable,
    InvalidCredential,
    Unclassified,
}

impl FailureKind {
    /// Classifies a set of failures. A rate limit on any model wins, then a
    /// missing model, then a rejected key.
    pub fn classify(failures: &[ModelFailure]) -> Self {
        let any = |pred: fn(&ModelError) -> bool| failures.iter().any(|f| pred(&f.error));

        if any(|e| matches!(e, ModelError::RateLimited(_))) {
            Self::RateLimited
        } else if any(|e| matches!(e, ModelError::NotFound(_))) {
            Self::ModelUnavailable
        } else if any(|e| matches!(e, ModelError::InvalidKey(_))) {
            Self::InvalidCredential
        } else {
            Self::Unclassified
        }
    }

    pub const fn user_message(self) -> &'static str {
        match self {
            Self::RateLimited => "Превышен лимит запросов (Quota Exceeded). Попробуйте позже.",
            Self::ModelUnavailable => {
                "Ошибка 404: Модели AI недоступны для вашего ключа. Убедитесь, что вы используете ключ из Google AI Studio (не Vertex AI)."
            }
            Self::InvalidCredential => "Неверный API ключ. Пожалуйста, проверьте его.",
            Self::Unclassified => "Извините, произошла ошибка при обращении к AI.",
        }
    }
}

impl RelayError {
    pub fn kind(&self) -> FailureKind {
        FailureKind::classify(&self.failures)
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}
