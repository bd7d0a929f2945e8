use api_types::{
    error::ErrorEnvelope,
    generate::{GenerateContentRequest, GenerateContentResponse},
};
use reqwest::{
    Url,
    header::{HeaderMap, HeaderValue},
};

use crate::{
    error::{ModelError, SetupError},
    relay::CompletionBackend,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client of the generative-language REST API.
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    base_url: Url,
    http: reqwest::Client,
}

impl GenerativeClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, SetupError> {
        // `Url::join` replaces the last segment unless the base ends in '/'
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|err| SetupError::InvalidBaseUrl(err.to_string()))?;

        let mut key = HeaderValue::from_str(api_key.trim()).map_err(|_| SetupError::InvalidApiKey)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, model: &str) -> Result<Url, ModelError> {
        self.base_url
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|err| ModelError::Server {
                status: 0,
                message: format!("invalid endpoint for {model}: {err}"),
            })
    }
}

impl CompletionBackend for GenerativeClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        let endpoint = self.endpoint(model)?;
        let res = self
            .http
            .post(endpoint)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            let body = res.json::<GenerateContentResponse>().await?;
            return body.text().ok_or(ModelError::EmptyResponse);
        }

        let message = res
            .json::<ErrorEnvelope>()
            .await
            .map(|env| env.error.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        Err(ModelError::from_status(status.as_u16(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let client = GenerativeClient::new("http://localhost:8080/proxy", "key").unwrap();
        assert_eq!(
            client.endpoint("gemini-pro").unwrap().as_str(),
            "http://localhost:8080/proxy/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn rejects_bad_setup() {
        assert!(matches!(
            GenerativeClient::new("not a url", "key"),
            Err(SetupError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            GenerativeClient::new("http://localhost", "bad\nkey"),
            Err(SetupError::InvalidApiKey)
        ));
    }
}
