use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use study_core::model::{GeneratorSettings, SessionParameters, StudyContent, parse_study_content};

use super::ContentGenerator;
use super::prompt::{SYSTEM_PROMPT, build_user_prompt};
use crate::error::GenerationError;

/// Generates content through an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct ChatContentGenerator {
    client: Client,
    settings: GeneratorSettings,
}

impl ChatContentGenerator {
    #[must_use]
    pub fn new(settings: GeneratorSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    fn request_for(&self, params: &SessionParameters) -> ChatRequest {
        ChatRequest {
            model: self.settings.model().to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_user_prompt(params),
                },
            ],
            temperature: 0.7,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

#[async_trait]
impl ContentGenerator for ChatContentGenerator {
    async fn generate(&self, params: &SessionParameters) -> Result<StudyContent, GenerationError> {
        let payload = self.request_for(params);
        let response = self
            .client
            .post(self.settings.completions_url())
            .bearer_auth(self.settings.api_key())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let reply = reply_text(body)?;
        Ok(parse_study_content(&reply)?)
    }

    fn name(&self) -> &'static str {
        "chat"
    }
}

fn reply_text(body: ChatResponse) -> Result<String, GenerationError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
