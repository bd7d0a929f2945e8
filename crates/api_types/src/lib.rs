//! Wire types of the generative-language `generateContent` endpoint.
use serde::{Deserialize, Serialize};

pub mod generate {
    use super::*;

    /// A single text fragment of a message.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Part {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub text: Option<String>,
    }

    impl Part {
        pub fn text(text: impl Into<String>) -> Self {
            Self {
                text: Some(text.into()),
            }
        }
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Content {
        /// `user` or `model`. Omitted for single-turn requests.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub role: Option<String>,
        #[serde(default)]
        pub parts: Vec<Part>,
    }

    /// Request body for `models/{model}:generateContent`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GenerateContentRequest {
        pub contents: Vec<Content>,
    }

    impl GenerateContentRequest {
        /// Single-turn request carrying one text prompt.
        pub fn from_prompt(prompt: impl Into<String>) -> Self {
            Self {
                contents: vec![Content {
                    role: None,
                    parts: vec![Part::text(prompt)],
                }],
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Candidate {
        #[serde(default)]
        pub content: Option<Content>,
        #[serde(default)]
        pub finish_reason: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GenerateContentResponse {
        #[serde(default)]
        pub candidates: Vec<Candidate>,
    }

    impl GenerateContentResponse {
        /// Concatenated text of the first candidate, if it has any.
        pub fn text(&self) -> Option<String> {
            let content = self.candidates.first()?.content.as_ref()?;
            let text: String = content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect();
            (!text.is_empty()).then_some(text)
        }
    }
}

pub mod error {
    use super::*;

    /// Error body returned with non-2xx statuses.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorEnvelope {
        pub error: ApiError,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ApiError {
        #[serde(default)]
        pub code: u16,
        #[serde(default)]
        pub message: String,
        /// Canonical status name, e.g. `RESOURCE_EXHAUSTED`.
        #[serde(default)]
        pub status: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::generate::*;

    #[test]
    fn request_has_expected_shape() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt("hi")).unwrap();
        assert_eq!(body, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn response_text_joins_parts() {
        let resp: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello"}, {"text": ", world"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(resp.text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn empty_response_has_no_text() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.text().is_none());
    }
}
