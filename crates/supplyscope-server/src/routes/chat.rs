//! Chat Routes - Supplier Q&A
//!
//! HTTP handlers that delegate to ChatService.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use supplyscope::DomainError;

use crate::application::ChatInput;
use crate::models::{api_error, bad_request, ApiError, ChatRequest, ChatResponse, ErrorResponse};
use crate::AppState;

/// Ask a question about a supplier
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Message missing or body malformed", body = ErrorResponse),
        (status = 500, description = "No AI provider configured or all providers failed", body = ErrorResponse)
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!("⚠️  Rejected chat body: {}", e);
        bad_request("Invalid JSON body")
    })?;

    let message = payload.message.unwrap_or_default();
    if message.trim().is_empty() {
        return Err(bad_request("Message required"));
    }

    let input = ChatInput {
        message,
        supplier_context: payload.supplier_context,
        history: payload.history.unwrap_or_default(),
        supplier_name: payload.supplier_name,
    };

    match state.chat_service.reply(&input).await {
        Ok(reply) => Ok(Json(ChatResponse { reply })),
        Err(DomainError::Validation(message)) => Err(bad_request(message)),
        Err(DomainError::NotConfigured(e)) => {
            tracing::error!("❌ Chat unavailable: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI service not configured",
            ))
        }
        Err(e) => {
            tracing::error!("❌ Chat failed: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "AI service error"))
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

#[cfg(test)]
mod tests {
    use super::super::testing::{app, json_response, post_json};
    use super::*;
    use crate::application::completion_chain::testing::{self as llm, FakeLlm};
    use crate::application::{CompletionChain, SearchChain};
    use supplyscope::LlmProviderKind;

    #[tokio::test]
    async fn test_chat_reply_without_search() {
        let groq = FakeLlm::answering(LlmProviderKind::Groq, "No FDA recalls found for Acme Corp.");
        let app = app(SearchChain::default(), llm::chain(vec![groq.clone()]));

        let (status, body) = json_response(
            &app,
            post_json(
                "/chat",
                r#"{"message": "Any FDA recalls?", "supplierName": "Acme Corp"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "No FDA recalls found for Acme Corp.");
        assert!(!groq.messages()[0].content.contains("RECENT WEB SEARCH RESULTS"));
    }

    #[tokio::test]
    async fn test_chat_forwards_history() {
        let groq = FakeLlm::answering(LlmProviderKind::Groq, "Yes.");
        let app = app(SearchChain::default(), llm::chain(vec![groq.clone()]));

        let (status, _) = json_response(
            &app,
            post_json(
                "/chat",
                r#"{"message": "And in Europe?", "supplierContext": "Acme: steel",
                    "history": [{"role": "user", "content": "Where do they operate?"},
                                {"role": "assistant", "content": "North America."}]}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let messages = groq.messages();
        assert_eq!(messages.len(), 4);
        assert!(messages[0].content.contains("Acme: steel"));
        assert_eq!(messages[2].content, "North America.");
    }

    #[tokio::test]
    async fn test_chat_message_required() {
        let app = app(SearchChain::default(), CompletionChain::default());

        let (status, body) = json_response(&app, post_json("/chat", r#"{"message": "  "}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message required");

        let (status, body) = json_response(&app, post_json("/chat", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message required");
    }

    #[tokio::test]
    async fn test_chat_malformed_body() {
        let app = app(SearchChain::default(), CompletionChain::default());

        let (status, body) = json_response(&app, post_json("/chat", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_chat_not_configured() {
        let app = app(SearchChain::default(), CompletionChain::default());

        let (status, body) = json_response(&app, post_json("/chat", r#"{"message": "hello"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "AI service not configured");
    }

    #[tokio::test]
    async fn test_chat_all_providers_failed() {
        let app = app(
            SearchChain::default(),
            llm::chain(vec![FakeLlm::failing(LlmProviderKind::OpenAI)]),
        );

        let (status, body) = json_response(&app, post_json("/chat", r#"{"message": "hello"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "AI service error");
    }
}
