use clap::ValueEnum;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;

// Generation parameters are fixed, not request-driven.
const TEMPERATURE: f64 = 0.8;
const MAX_OUTPUT_TOKENS: u32 = 512;

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODEL: &str = "gemini-2.0-flash";
const GROQ_BASE: &str = "https://api.groq.com";
const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to completion provider failed: {0}")]
    Http(#[from] reqwest::Error),
    // non-success status from the provider, message taken from its error
    // envelope when present
    #[error("{message}")]
    Status { status: u16, message: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Groq,
}

impl ProviderKind {
    // Environment variable holding the provider credential
    pub fn key_var(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::Groq => "GROQ_API_KEY",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Groq => "Groq",
        }
    }
}

// Completion backend as a capability: complete(prompt) -> text | error.
// One wire shape per provider, picked once at startup.
pub struct CompletionClient {
    kind: ProviderKind,
    http: reqwest::Client,
}

impl CompletionClient {
    pub fn new(kind: ProviderKind, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build http client");
        Self { kind, http }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError> {
        let response = match self.kind {
            // Gemini carries the credential as a query parameter and nests
            // the prompt under contents/parts.
            ProviderKind::Gemini => {
                let url = format!(
                    "{GEMINI_BASE}/v1/models/{GEMINI_MODEL}:generateContent?key={api_key}"
                );
                self.http
                    .post(url)
                    .json(&json!({
                        "contents": [{ "parts": [{ "text": prompt }] }],
                        "generationConfig": {
                            "temperature": TEMPERATURE,
                            "maxOutputTokens": MAX_OUTPUT_TOKENS,
                        }
                    }))
                    .send()
                    .await?
            }
            // Groq speaks the OpenAI chat-completions shape with a bearer
            // header.
            ProviderKind::Groq => {
                let url = format!("{GROQ_BASE}/openai/v1/chat/completions");
                self.http
                    .post(url)
                    .bearer_auth(api_key)
                    .json(&json!({
                        "model": GROQ_MODEL,
                        "messages": [{ "role": "user", "content": prompt }],
                        "temperature": TEMPERATURE,
                        "max_tokens": MAX_OUTPUT_TOKENS,
                    }))
                    .send()
                    .await?
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| error_message(&body))
                .unwrap_or_else(|| format!("{} API Error", self.kind.label()));
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        Ok(extract_text(self.kind, &body))
    }
}

// Pull the first completion's text out of the provider envelope. Any missing
// field along the path yields an empty string, never an error.
pub fn extract_text(kind: ProviderKind, body: &Value) -> String {
    let path = match kind {
        ProviderKind::Gemini => "/candidates/0/content/parts/0/text",
        ProviderKind::Groq => "/choices/0/message/content",
    };
    body.pointer(path)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

// Both providers wrap failures as { "error": { "message": ... } }
pub fn error_message(body: &Value) -> Option<String> {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_text_is_extracted_and_trimmed() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "  > MARKET: HOT\n" }] }
            }]
        });
        assert_eq!(extract_text(ProviderKind::Gemini, &body), "> MARKET: HOT");
    }

    #[test]
    fn chat_text_is_extracted_and_trimmed() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": " ok " } }]
        });
        assert_eq!(extract_text(ProviderKind::Groq, &body), "ok");
    }

    #[test]
    fn missing_text_field_yields_empty_string() {
        assert_eq!(extract_text(ProviderKind::Gemini, &json!({})), "");
        assert_eq!(
            extract_text(ProviderKind::Gemini, &json!({ "candidates": [] })),
            ""
        );
        assert_eq!(
            extract_text(ProviderKind::Groq, &json!({ "choices": [{}] })),
            ""
        );
    }

    #[test]
    fn error_envelope_message_is_surfaced() {
        let body = json!({ "error": { "message": "X", "code": 503 } });
        assert_eq!(error_message(&body).as_deref(), Some("X"));
        assert_eq!(error_message(&json!({ "error": "flat" })), None);
        assert_eq!(error_message(&json!({})), None);
    }

    #[test]
    fn key_var_follows_provider() {
        assert_eq!(ProviderKind::Gemini.key_var(), "GEMINI_API_KEY");
        assert_eq!(ProviderKind::Groq.key_var(), "GROQ_API_KEY");
    }
}
