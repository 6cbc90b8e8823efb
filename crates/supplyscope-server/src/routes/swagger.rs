//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use supplyscope::{
    ChatMessage, EsgConfidence, EsgRating, EsgScore, EsgSource, IssueCategory, MessageRole,
    NewsItem, PortfolioSupplier, ReputationIssue, ReputationScore, RiskFactor, RiskLevel,
    Severity, SupplierIntel, SupplierTrend,
};

use crate::models::{
    ChatRequest, ChatResponse, ErrorResponse, PortfolioRequest, PortfolioResponse, StatusResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::chat::chat,
        super::intel::intel,
        super::portfolio::analyze_portfolio,
        super::status::ai_status,
    ),
    info(
        title = "SupplyScope API",
        version = "0.1.0",
        description = "Supplier intelligence: AI chat, company reports with reputation and ESG scoring, and portfolio analysis.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Chat", description = "Chat - Supplier Q&A with optional web search"),
        (name = "Intel", description = "Intel - Supplier intelligence report"),
        (name = "Portfolio", description = "Portfolio - Strategic portfolio analysis"),
        (name = "Status", description = "Status - AI backend availability"),
    ),
    components(
        schemas(
            // Chat
            ChatRequest,
            ChatResponse,
            ChatMessage,
            MessageRole,
            // Intel
            SupplierIntel,
            RiskFactor,
            RiskLevel,
            EsgScore,
            EsgRating,
            EsgSource,
            EsgConfidence,
            NewsItem,
            ReputationScore,
            ReputationIssue,
            IssueCategory,
            Severity,
            // Portfolio
            PortfolioRequest,
            PortfolioResponse,
            PortfolioSupplier,
            SupplierTrend,
            // Status
            StatusResponse,
            ErrorResponse,
        )
    ),
)]
pub struct ApiDoc;
