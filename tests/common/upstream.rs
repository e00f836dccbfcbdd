//! Mock OpenAI and ElevenLabs servers

use examiner_gateway::config::Config;
use examiner_gateway::server::{AppState, HttpServer};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bytes every mocked synthesis returns
pub const SYNTHESIZED_AUDIO: &[u8] = b"ID3\x04\x00fake-mpeg-frames-0123456789";

/// A pair of mock upstreams
pub struct Upstreams {
    pub openai: MockServer,
    pub elevenlabs: MockServer,
}

impl Upstreams {
    pub async fn start() -> Self {
        Self {
            openai: MockServer::start().await,
            elevenlabs: MockServer::start().await,
        }
    }

    /// Configuration targeting the mocks, with test keys
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.gateway.providers.timeout = 5;
        config.gateway.providers.openai.api_key = "sk-test-openai-key".to_string();
        config.gateway.providers.openai.api_base = self.openai.uri();
        config.gateway.providers.elevenlabs.api_key = "el-test-key".to_string();
        config.gateway.providers.elevenlabs.api_base = self.elevenlabs.uri();
        config.gateway.audio_store.chunk_size = 7;
        config
    }

    /// Application state using the real provider clients
    pub fn state(&self) -> AppState {
        self.state_with(self.config())
    }

    pub fn state_with(&self, config: Config) -> AppState {
        HttpServer::new(&config)
            .expect("server builds from test config")
            .state()
            .clone()
    }

    /// Answer chat completions with `content`
    pub async fn chat_replies(&self, content: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(content)))
            .expect(expected_calls)
            .mount(&self.openai)
            .await;
    }

    /// Answer transcriptions with `text`
    pub async fn transcription_replies(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": text })))
            .mount(&self.openai)
            .await;
    }

    /// Answer syntheses with [`SYNTHESIZED_AUDIO`]
    pub async fn synthesis_replies(&self, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/text-to-speech/[A-Za-z0-9]+$"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(SYNTHESIZED_AUDIO),
            )
            .expect(expected_calls)
            .mount(&self.elevenlabs)
            .await;
    }

    /// Bodies of chat completion requests the OpenAI mock received
    pub async fn chat_requests(&self) -> Vec<Value> {
        self.openai
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == "/chat/completions")
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}

/// OpenAI chat completion response body
pub fn chat_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content, "refusal": null },
            "finish_reason": "stop"
        }]
    })
}
