use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::classification::ClassificationOutcome;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::prompt::classification_prompt;
use crate::services::ClassifierService;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String) -> AppResult<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not set".to_string()))?;
        Ok(Self {
            http: Client::new(),
            api_key,
            model,
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(config.gemini_api_key.clone(), config.gemini_model.clone())
    }

    fn endpoint(&self) -> String {
        format!(
            "{GEMINI_API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        )
    }

    /// One blocking round trip to the generateContent endpoint. No retries,
    /// no timeout override, no streaming.
    async fn generate_text(&self, prompt: &str) -> AppResult<String> {
        let request_body = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .http
            .post(self.endpoint())
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::Api(format!("failed to call Gemini: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Api(format!(
                "Gemini responded with {status}: {body}"
            )));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|err| {
            AppError::Api(format!("failed to decode Gemini response: {err}"))
        })?;

        payload
            .into_text()
            .ok_or_else(|| AppError::Api("Gemini returned an empty response".to_string()))
    }
}

#[async_trait]
impl ClassifierService for GeminiClient {
    async fn classify(&self, ticket: &Ticket) -> ClassificationOutcome {
        debug!(ticket_id = %ticket.id, model = %self.model, "requesting classification");

        let prompt = classification_prompt(ticket);
        match self.generate_text(&prompt).await {
            Ok(raw) => ClassificationOutcome::from_response(&ticket.id, &raw),
            Err(err) => ClassificationOutcome::failure(&ticket.id, err.to_string(), None),
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![TextPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Join the text parts of the first candidate, the way the official
    /// SDKs expose `response.text`.
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text = candidate
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_requires_api_key() {
        let result = GeminiClient::new(None, "gemini-2.0-flash-exp".to_string());
        assert!(matches!(result, Err(AppError::Configuration(_))));

        let result = GeminiClient::new(Some("   ".to_string()), "gemini-2.0-flash-exp".to_string());
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn construction_with_key_succeeds() {
        let client =
            GeminiClient::new(Some("test-key".to_string()), "gemini-2.0-flash-exp".to_string())
                .unwrap();
        assert!(client.endpoint().contains("gemini-2.0-flash-exp:generateContent"));
        assert!(client.endpoint().ends_with("key=test-key"));
    }

    #[test]
    fn joins_candidate_text_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn empty_candidate_list_yields_none() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.into_text().is_none());

        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap();
        assert!(response.into_text().is_none());
    }
}
