//! Networked recognition backend (OpenAI-compatible transcription API).

use super::backend::{Recognition, SpeechBackend};
use crate::audio::AudioClip;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/v1/audio/transcriptions";
const DEFAULT_MODEL: &str = "whisper-1";
const DEFAULT_LANGUAGE: &str = "en-US";

/// Configuration for the remote recognition API.
#[derive(Debug, Clone)]
pub struct RemoteRecognizerConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Fixed locale for the whole invocation.
    pub language: String,
}

impl RemoteRecognizerConfig {
    pub fn new(
        base_url: String,
        model: String,
        api_key: Option<String>,
        language: String,
    ) -> Self {
        Self {
            base_url: base_url.trim().to_string(),
            model,
            api_key,
            language,
        }
    }

    /// Read `STT_API_URL`, `STT_API_MODEL`, `STT_API_KEY` and `STT_LANGUAGE`
    /// from the environment, with localhost defaults.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("STT_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            std::env::var("STT_API_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            std::env::var("STT_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            std::env::var("STT_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
        )
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Primary backend. POSTs the clip as multipart form data to the configured
/// endpoint (user provides the full endpoint, e.g.
/// http://localhost:8000/v1/audio/transcriptions).
pub struct RemoteRecognizer {
    config: RemoteRecognizerConfig,
}

impl RemoteRecognizer {
    pub fn new(config: RemoteRecognizerConfig) -> Self {
        Self { config }
    }
}

impl SpeechBackend for RemoteRecognizer {
    fn id(&self) -> &'static str {
        "remote-api"
    }

    fn name(&self) -> &'static str {
        "remote transcription API"
    }

    fn is_available(&self) -> bool {
        !self.config.base_url.is_empty()
    }

    async fn recognize(&self, clip: &AudioClip) -> Result<Recognition, String> {
        let part = reqwest::multipart::Part::bytes(clip.wav_bytes.clone())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| e.to_string())?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", self.config.language.clone());

        let client = reqwest::Client::new();
        let mut req = client.post(&self.config.base_url).multipart(form);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }

        // Any transport failure means the service is unreachable and the
        // caller should try the fallback engine.
        let response = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                log::debug!("remote backend unreachable: {}", e);
                return Ok(Recognition::Unavailable);
            }
        };

        let status = response.status();
        if status.is_server_error() || status.as_u16() == 429 {
            log::debug!("remote backend error {}", status);
            return Ok(Recognition::Unavailable);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => body,
            };
            return Err(format!("API error {}: {}", status, message));
        }

        let parsed: TranscriptionResponse = response.json().await.map_err(|e| e.to_string())?;
        let text = parsed.text.trim();
        if text.is_empty() {
            Ok(Recognition::Unintelligible)
        } else {
            Ok(Recognition::Hypothesis(text.to_string()))
        }
    }
}
