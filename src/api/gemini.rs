use crate::api::keys::ApiKey;
use crate::api::GenerativeBackend;
use crate::config::Config;
use crate::error::{DirectorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_content(&self, api_key: &ApiKey, prompt: &str) -> Result<String> {
        info!("Requesting {} with key {}", self.model, api_key);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key.expose())])
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(classify_http_failure(status.as_u16(), &error_text));
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_text(body)
    }
}

/// Single-turn request asking for a bare JSON object back.
fn request_body(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ],
        "generationConfig": {
            "responseMimeType": "application/json"
        }
    })
}

fn classify_http_failure(status: u16, body: &str) -> DirectorError {
    if body.contains("API key not valid") || body.contains("API_KEY_INVALID") {
        return DirectorError::InvalidApiKey(format!("HTTP {}: {}", status, body));
    }
    DirectorError::Api(format!("Gemini API error (HTTP {}): {}", status, body))
}

fn extract_text(body: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(DirectorError::ContentBlocked(format!("prompt blocked: {}", reason)));
    }

    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| DirectorError::Api("response contained no candidates".to_string()))?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            return Err(DirectorError::ContentBlocked(format!(
                "candidate finished with {}",
                reason
            )));
        }
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    debug!("Received {} characters from model", text.len());
    Ok(text)
}
