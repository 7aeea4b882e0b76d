// MyMemory translation client and the backend seam the orchestrator talks to

use async_trait::async_trait;
use reqwest::header::REFERER;
use serde::Deserialize;
use std::time::Duration;

use super::language::LanguagePair;

/// Default service endpoint, overridable through the config file.
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Longest query the free endpoint accepts, in bytes.
pub const INPUT_LIMIT: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Service answered with a non-success status code.
    #[error("HTTP ERROR: {0}")]
    Status(u16),

    /// Request never produced a usable response (connect, timeout, read).
    #[error("request failed: {0}")]
    Transport(String),

    /// Response arrived but did not have the expected shape.
    #[error("unexpected response: {0}")]
    Malformed(String),

    /// Query rejected locally before any network call.
    #[error("text is {0} bytes, limit is {1}")]
    TooLong(usize, usize),
}

/// Seam between the orchestrator and the translation service, so tests can
/// drive the debounce loop with a scripted backend.
#[async_trait]
pub trait TranslateBackend: Send + Sync {
    async fn translate(&self, text: &str, pair: LanguagePair) -> Result<String, TranslateError>;
}

/// Client for the MyMemory translation API.
pub struct MyMemoryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl MyMemoryClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranslateError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(rename = "responseData")]
    response_data: ResponseData,
}

#[derive(Deserialize)]
struct ResponseData {
    // The API reports some failures as a JSON null here.
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

fn parse_payload(body: &str) -> Result<String, TranslateError> {
    let parsed: ApiResponse =
        serde_json::from_str(body).map_err(|e| TranslateError::Malformed(e.to_string()))?;

    parsed
        .response_data
        .translated_text
        .ok_or_else(|| TranslateError::Malformed("translatedText is missing".to_string()))
}

#[async_trait]
impl TranslateBackend for MyMemoryClient {
    async fn translate(&self, text: &str, pair: LanguagePair) -> Result<String, TranslateError> {
        if text.len() > INPUT_LIMIT {
            return Err(TranslateError::TooLong(text.len(), INPUT_LIMIT));
        }

        let langpair = pair.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .header(REFERER, "https://mymemory.translated.net")
            .send()
            .await
            .map_err(|e| TranslateError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranslateError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TranslateError::Transport(e.to_string()))?;

        parse_payload(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::language::Language;

    #[test]
    fn parses_translated_text() {
        let body = r#"{"responseData":{"translatedText":"Hello"},"responseStatus":200}"#;
        assert_eq!(parse_payload(body).unwrap(), "Hello");
    }

    #[test]
    fn null_translation_is_malformed() {
        let body = r#"{"responseData":{"translatedText":null}}"#;
        let err = parse_payload(body).unwrap_err();
        assert!(matches!(err, TranslateError::Malformed(_)));
    }

    #[test]
    fn missing_response_data_is_malformed() {
        let err = parse_payload(r#"{"responseStatus":200}"#).unwrap_err();
        assert!(matches!(err, TranslateError::Malformed(_)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_payload("<html>teapot</html>").unwrap_err();
        assert!(matches!(err, TranslateError::Malformed(_)));
    }

    #[test]
    fn status_error_message_carries_the_code() {
        assert_eq!(TranslateError::Status(500).to_string(), "HTTP ERROR: 500");
    }

    #[tokio::test]
    async fn over_long_text_is_rejected_before_any_request() {
        // Unroutable endpoint: the limit check must trip first.
        let client = MyMemoryClient::new("http://127.0.0.1:1/get", Duration::from_secs(1)).unwrap();
        let text = "a".repeat(INPUT_LIMIT + 1);
        let pair = LanguagePair::new(Language::Portuguese, Language::English);

        let err = client.translate(&text, pair).await.unwrap_err();
        assert!(matches!(err, TranslateError::TooLong(len, limit) if len == 501 && limit == 500));
    }
}
