//! # AI Service Client
//!
//! HTTP client for the external inference service.
//!
//! ## Endpoints Used
//!
//! - `POST {base}/generate` - text (and optionally audio) for one message
//! - `GET {base}/health` - liveness probe
//! - `GET {base}/audio/{filename}` - never fetched here, only linked via [`AiServiceClient::audio_url`]
//!
//! ## Failure Mapping
//!
//! | Outcome | Result |
//! |---|---|
//! | connect error, timeout, non-2xx status | `AppError::UpstreamUnavailable` |
//! | 2xx with an undecodable body | `AppError::Internal` |
//! | 2xx with `success: false` | `Ok(GenerateResponse)`; the caller decides |
//!
//! No retries and no caching.

use lib_core::dto::{GenerateRequest, GenerateResponse};
use lib_core::{AppError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Longest slice of an error body copied into logs.
const MAX_LOGGED_BODY: usize = 500;

/// HTTP client wrapper for the AI service
pub struct AiServiceClient {
    http: Client,
    base_url: String,
}

impl AiServiceClient {
    /// Create a new client; `timeout` bounds each whole request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL of a generated audio file.
    pub fn audio_url(&self, filename: &str) -> String {
        format!("{}/audio/{}", self.base_url, filename)
    }

    /// Ask the AI service to answer a message.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, generate_audio = request.generate_audio))]
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/generate", self.base_url);
        debug!("[AI] POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("[AI] Request timed out: {}", e);
                } else {
                    error!("[AI] Request failed: {}", e);
                }
                AppError::UpstreamUnavailable(format!("AI service request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_LOGGED_BODY).collect();
            error!(status = status.as_u16(), response = %body, "[AI] AI service error");
            return Err(AppError::UpstreamUnavailable(format!(
                "AI service responded with HTTP {}",
                status
            )));
        }

        response.json::<GenerateResponse>().await.map_err(|e| {
            if e.is_timeout() {
                warn!("[AI] Timed out reading response body: {}", e);
                AppError::UpstreamUnavailable(format!("AI service response timed out: {}", e))
            } else {
                AppError::Internal(format!("Failed to decode AI service response: {}", e))
            }
        })
    }

    /// `true` when `GET /health` answers with a 2xx status.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("[AI] Health check failed: {}", e);
                false
            }
        }
    }
}

// endregion: --- Tests
