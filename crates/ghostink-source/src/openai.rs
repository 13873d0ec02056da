//! OpenAI-backed completion provider
//!
//! Builds the completion prompt from the buffer and page context, calls
//! the chat completions endpoint and parses the structured payload, with
//! raw-text fallback for unparseable replies.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use ghostink_core::{
    CompletionPort, CompletionRequest, CompletionResponse, PageContext, TrackerResult,
};

use crate::error::SourceError;
use crate::sanitize::{parse_completion_payload, sanitize_response};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You are a writing assistant that completes text as the user types. \
Respond ONLY with a JSON object of this exact shape: \
{\"completion\": \"primary continuation\", \"lastWord\": \"...\", \
\"alternatives\": [\"...\", \"...\", \"...\"], \"confidence\": 0.9}. \
Keep completions concise (2-7 words) and natural for the surrounding page. \
Alternatives must take meaningfully different directions. \
For lastWord: return the final complete word the continuation follows, or an \
empty string when the continuation finishes a partial word the user is still typing.";

/// OpenAI chat-completions provider
pub struct OpenAiCompletionSource {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OpenAiCompletionSource {
    pub fn new(api_key: String) -> Result<Self, SourceError> {
        if api_key.is_empty() {
            return Err(SourceError::Config(
                "API key not configured".to_string(),
            ));
        }
        Ok(Self {
            api_key,
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

fn context_text(context: &PageContext) -> String {
    format!(
        "PAGE TITLE: {}\nPAGE DESCRIPTION: {}\nFORM FIELDS: {}\nNEARBY TEXT: {}\n\
         PAGE HEADINGS: {}\nINPUT FIELD INFO:\n  - Label: {}\n  - Placeholder: {}\n\
         - Field Name: {}\n  - Field Type: {}",
        context.title,
        context.description,
        context.form_field_names.join(" "),
        context.nearby_text,
        context.headings,
        context.input_label,
        context.input_placeholder,
        context.input_name,
        context.input_type,
    )
}

fn user_prompt(request: &CompletionRequest) -> String {
    let before: String = request.buffer_text.chars().take(request.cursor_offset).collect();
    let after: String = request.buffer_text.chars().skip(request.cursor_offset).collect();
    let last_word = before.split_whitespace().last().unwrap_or("");
    let is_partial = !before.ends_with(' ') && !last_word.is_empty();
    format!(
        "Webpage context:\n{}\n\nThe user is typing (| is cursor): \"{}|{}\"\n\
         Last word being typed: \"{}\"\nIs partial word: {}\n\n\
         Provide completion suggestions that naturally continue from the current text.",
        context_text(&request.page_context),
        before,
        after,
        last_word,
        is_partial,
    )
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl CompletionPort for OpenAiCompletionSource {
    async fn complete(&self, request: CompletionRequest) -> TrackerResult<CompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt(&request) },
            ],
            "temperature": self.temperature,
            "max_tokens": 150,
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|err| SourceError::Network(err.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .map(|detail| detail.message)
                .unwrap_or_else(|| format!("API request failed with status {status}"));
            error!(%status, "completion API request failed");
            return Err(SourceError::Model(detail).into());
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| SourceError::InvalidResponse(err.to_string()))?;
        let content = payload
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| SourceError::InvalidResponse("no choices in response".to_string()))?;

        debug!(chars = content.len(), "completion payload received");
        let parsed = parse_completion_payload(&content);
        let sanitized = sanitize_response(parsed)?;
        Ok(sanitized)
    }
}
