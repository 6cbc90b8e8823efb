//! Chat - Supplier Q&A

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use supplyscope::ChatMessage;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Free-text description of the supplier under discussion
    pub supplier_context: Option<String>,
    pub history: Option<Vec<ChatMessage>>,
    /// Prefixed to web search queries when a search is triggered
    pub supplier_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}
