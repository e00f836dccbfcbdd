//! OpenAI HTTP client

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::PROVIDER_NAME;
use crate::config::OpenAIConfig;
use crate::core::providers::base::{build_http_client, check_status};
use crate::core::providers::error::ProviderError;
use crate::core::providers::types::{
    ChatCompletion, ChatRequest, Transcription, TranscriptionRequest,
};
use crate::core::providers::{LanguageModel, SpeechToText};

/// OpenAI client for chat completions and audio transcription
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ChoiceBody>,
}

#[derive(Debug, Deserialize)]
struct ChoiceBody {
    message: AssistantMessageBody,
}

#[derive(Debug, Deserialize)]
struct AssistantMessageBody {
    content: Option<String>,
    refusal: Option<String>,
}

impl OpenAIClient {
    /// Create a new client from configuration
    pub fn new(config: &OpenAIConfig, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            http: build_http_client(PROVIDER_NAME, timeout)?,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn bearer(&self) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::authentication(
                PROVIDER_NAME,
                "API key not configured",
            ));
        }
        Ok(format!("Bearer {}", self.api_key))
    }
}

#[async_trait]
impl LanguageModel for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError> {
        let url = format!("{}/chat/completions", self.api_base);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            structured = request.response_format.is_some(),
            "Sending chat completion"
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.bearer()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_NAME, e))?;

        let response = check_status(PROVIDER_NAME, response).await?;
        let body: ChatCompletionBody = response
            .json()
            .await
            .map_err(|e| ProviderError::response_parsing(PROVIDER_NAME, e.to_string()))?;

        let message = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| ProviderError::response_parsing(PROVIDER_NAME, "no choices returned"))?;

        match (message.content, message.refusal) {
            (Some(content), _) => Ok(ChatCompletion {
                model: body.model,
                content,
            }),
            (None, Some(refusal)) => Err(ProviderError::response_parsing(
                PROVIDER_NAME,
                format!("model refused: {}", refusal),
            )),
            (None, None) => Err(ProviderError::response_parsing(
                PROVIDER_NAME,
                "reply had no content",
            )),
        }
    }
}

#[async_trait]
impl SpeechToText for OpenAIClient {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<Transcription, ProviderError> {
        let url = format!("{}/audio/transcriptions", self.api_base);
        debug!(
            model = %request.model,
            file_size = request.file.len(),
            "Sending transcription"
        );

        let file_part = reqwest::multipart::Part::bytes(request.file.to_vec())
            .file_name(request.filename)
            .mime_str(&request.content_type)
            .map_err(|e| {
                ProviderError::invalid_request(PROVIDER_NAME, format!("Invalid MIME type: {}", e))
            })?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", request.model)
            .text("response_format", "json");
        if let Some(language) = request.language.clone() {
            form = form.text("language", language);
        }

        let response = self
            .http
            .post(&url)
            .header("Authorization", self.bearer()?)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER_NAME, e))?;

        let response = check_status(PROVIDER_NAME, response).await?;
        let mut transcription: Transcription = response
            .json()
            .await
            .map_err(|e| ProviderError::response_parsing(PROVIDER_NAME, e.to_string()))?;

        if transcription.language.is_none() {
            transcription.language = request.language;
        }
        Ok(transcription)
    }
}
