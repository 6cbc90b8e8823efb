//! Local HTTP servers standing in for provider APIs

use axum::{
    http::{header, StatusCode},
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral port and returns its base URL
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Answers every request with `body` as JSON
pub async fn json_server(body: &'static str) -> String {
    serve(Router::new().fallback(move || async move {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
    }))
    .await
}

pub async fn failing_server() -> String {
    serve(Router::new().fallback(|| async {
        (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable")
    }))
    .await
}

pub async fn garbage_server() -> String {
    json_server("{\"choices\": [oops").await
}

/// Accepts requests and never answers within any sane timeout
pub async fn hanging_server() -> String {
    serve(Router::new().fallback(|| async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        "too late"
    }))
    .await
}

pub const SHORT_TIMEOUT: Duration = Duration::from_millis(200);
