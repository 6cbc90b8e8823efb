use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;

use application::{
    ChatService, CompletionChain, EsgService, IntelService, PortfolioService, SearchChain,
    StatusService,
};
use config::AppConfig;
use supplyscope::{ReputationScorer, SearchTrigger};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub intel_service: Arc<IntelService>,
    pub portfolio_service: Arc<PortfolioService>,
    pub status_service: Arc<StatusService>,
}

impl AppState {
    pub fn new(
        search: SearchChain,
        completions: CompletionChain,
        portfolio: CompletionChain,
        status: StatusService,
        trigger: SearchTrigger,
    ) -> Self {
        let esg = EsgService::new(search.clone(), completions.clone());
        Self {
            chat_service: Arc::new(ChatService::new(
                completions.clone(),
                search.clone(),
                trigger,
            )),
            intel_service: Arc::new(IntelService::new(
                search,
                completions,
                esg,
                ReputationScorer::default(),
            )),
            portfolio_service: Arc::new(PortfolioService::new(portfolio)),
            status_service: Arc::new(status),
        }
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "SupplyScope API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn build_router(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::chat::router())
        .merge(routes::intel::router())
        .merge(routes::portfolio::router())
        .merge(routes::status::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn init_tracing() {
    // A second init (e.g. under the shuttle local runner) keeps the existing subscriber
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "supplyscope_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    dotenvy::dotenv().ok();
    init_tracing();
    tracing::info!("🏭 SupplyScope API initializing...");

    let config = AppConfig::from_secrets(&secrets)?;
    let client = reqwest::Client::new();

    let search = SearchChain::new(adapters::search_providers(&config, &client));
    if search.is_empty() {
        tracing::warn!("⚠️  No search providers enabled - reports use model knowledge only");
    } else {
        tracing::info!("🔍 Search providers: {}", search.provider_names().join(" → "));
    }

    let completions = CompletionChain::new(adapters::llm_providers(
        &config.llm_providers,
        &config,
        &client,
    ));
    tracing::info!("🤖 Text providers: {}", completions.provider_names().join(" → "));

    let portfolio = CompletionChain::new(adapters::llm_providers(
        &config.portfolio_providers,
        &config,
        &client,
    ));
    tracing::info!("📊 Portfolio providers: {}", portfolio.provider_names().join(" → "));

    let local: Arc<dyn supplyscope::LlmProvider> =
        Arc::new(adapters::ollama_provider(&config, &client));
    let status = StatusService::new(config.keyed_cloud_providers(), vec![local]);

    tracing::info!("💬 Chat search trigger: {}", config.chat_search_trigger);
    let state = AppState::new(
        search,
        completions,
        portfolio,
        status,
        config.chat_search_trigger.clone(),
    );

    let router = build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ SupplyScope API ready");

    Ok(router.into())
}
