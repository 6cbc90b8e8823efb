//! Status - AI backend availability

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::AiStatus;

const OFFLINE_MESSAGE: &str = "No AI service configured. Add OPENAI_API_KEY or GROQ_API_KEY.";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusResponse {
    /// `online` or `offline`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<AiStatus> for StatusResponse {
    fn from(status: AiStatus) -> Self {
        match status {
            AiStatus::Cloud { providers } => StatusResponse {
                status: "online".to_string(),
                provider: providers.first().cloned(),
                message: Some(format!("AI powered by {}", providers.join(", "))),
                providers: Some(providers),
                url: None,
                models: None,
            },
            AiStatus::Local {
                provider,
                url,
                models,
            } => StatusResponse {
                status: "online".to_string(),
                provider: Some(provider),
                providers: None,
                url,
                models: Some(models),
                message: None,
            },
            AiStatus::Offline => StatusResponse {
                status: "offline".to_string(),
                provider: None,
                providers: None,
                url: None,
                models: None,
                message: Some(OFFLINE_MESSAGE.to_string()),
            },
        }
    }
}
