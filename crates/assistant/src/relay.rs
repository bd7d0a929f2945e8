use std::future::Future;

use crate::error::{ModelError, ModelFailure, RelayError};

const PROMPT_PREAMBLE: &str = "Ты финансовый помощник в приложении FinTrack.kz.
Твоя задача - помогать пользователям с финансовыми вопросами, кредитами и накоплениями.
Отвечай кратко, вежливо и по делу. Используй форматирование Markdown где уместно.";

/// Wraps a user question into the assistant prompt.
pub fn prompt_for(question: &str) -> String {
    format!("{PROMPT_PREAMBLE}\n\nВопрос пользователя: {question}")
}

/// Something that can answer a prompt with a given model.
pub trait CompletionBackend: Send + Sync {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}

/// Forwards questions to the backend, falling back through `models` in
/// order.
#[derive(Debug)]
pub struct ChatRelay<B> {
    backend: B,
    models: Vec<String>,
}

impl<B: CompletionBackend> ChatRelay<B> {
    pub fn new(backend: B, models: Vec<String>) -> Self {
        Self { backend, models }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Returns the first successful answer, verbatim.
    ///
    /// Models are tried one after another, without delay. When all of them
    /// fail the error carries every attempt.
    pub async fn ask(&self, question: &str) -> Result<String, RelayError> {
        let prompt = prompt_for(question);
        let mut failures = Vec::with_capacity(self.models.len());

        for model in &self.models {
            match self.backend.generate(model, &prompt).await {
                Ok(text) => {
                    tracing::debug!(model = %model, "assistant answered");
                    return Ok(text);
                }
                Err(error) => {
                    tracing::warn!(model = %model, "model attempt failed: {error}");
                    failures.push(ModelFailure {
                        model: model.clone(),
                        error,
                    });
                }
            }
        }

        let err = RelayError { failures };
        tracing::error!("{err}");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use std::{future, sync::Mutex};

    use super::*;
    use crate::FailureKind;

    struct Scripted<F> {
        answer: F,
        calls: Mutex<Vec<String>>,
    }

    impl<F> Scripted<F>
    where
        F: Fn(&str) -> Result<String, ModelError> + Send + Sync,
    {
        fn new(answer: F) -> Self {
            Self {
                answer,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl<F> CompletionBackend for Scripted<F>
    where
        F: Fn(&str) -> Result<String, ModelError> + Send + Sync,
    {
        fn generate(
            &self,
            model: &str,
            _prompt: &str,
        ) -> impl Future<Output = Result<String, ModelError>> + Send {
            self.calls.lock().unwrap().push(model.to_string());
            future::ready((self.answer)(model))
        }
    }

    fn models() -> Vec<String> {
        vec!["first".to_string(), "second".to_string()]
    }

    #[tokio::test]
    async fn first_success_wins() {
        let relay = ChatRelay::new(Scripted::new(|m| Ok(format!("from {m}"))), models());

        assert_eq!(relay.ask("hi").await.unwrap(), "from first");
        assert_eq!(relay.backend.calls(), vec!["first"]);
    }

    #[tokio::test]
    async fn falls_back_in_order() {
        let backend = Scripted::new(|m| match m {
            "first" => Err(ModelError::NotFound("missing".into())),
            _ => Ok("ok".to_string()),
        });
        let relay = ChatRelay::new(backend, models());

        assert_eq!(relay.ask("hi").await.unwrap(), "ok");
        assert_eq!(relay.backend.calls(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn all_failures_are_aggregated() {
        let backend = Scripted::new(|m| match m {
            "first" => Err(ModelError::NotFound("missing".into())),
            _ => Err(ModelError::RateLimited("quota".into())),
        });
        let relay = ChatRelay::new(backend, models());

        let err = relay.ask("hi").await.unwrap_err();
        assert_eq!(err.failures.len(), 2);
        assert_eq!(err.kind(), FailureKind::RateLimited);
    }

    #[tokio::test]
    async fn no_models_is_unclassified() {
        let relay = ChatRelay::new(Scripted::new(|_| Ok(String::new())), Vec::new());

        let err = relay.ask("hi").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unclassified);
    }

    #[test]
    fn prompt_ends_with_question() {
        let prompt = prompt_for("Как быстрее погасить кредит?");
        assert!(prompt.starts_with("Ты финансовый помощник в приложении FinTrack.kz."));
        assert!(prompt.ends_with("\n\nВопрос пользователя: Как быстрее погасить кредит?"));
    }
}
