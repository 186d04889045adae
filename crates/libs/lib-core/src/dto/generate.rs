//! # AI Service Data Transfer Objects
//!
//! Payloads of the outbound `POST /generate` call.

use serde::{Deserialize, Serialize};

/// Body sent to the AI service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub message: String,
    pub user_id: String,
    pub generate_audio: bool,
}

/// Body returned by the AI service. Extra fields (`processing_time`, ...) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio_filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Audio file name, if the service produced one.
    pub fn audio_filename(&self) -> Option<&str> {
        self.audio_filename.as_deref().filter(|name| !name.is_empty())
    }
}
