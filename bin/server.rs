// Registry Pipeline - Publish Webhook Server
// Receives content-publishing webhooks, reshapes the payload, and
// forwards the article to the backend data store's REST API

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use registry_pipeline::webhook::{Article, PublishPayload};

/// Shared application state
#[derive(Clone)]
struct AppState {
    backend_url: String,
    service_key: String,
    client: reqwest::Client,
}

/// Success body returned to the publishing platform
#[derive(Serialize)]
struct SyncResponse {
    success: bool,
    message: String,
    article_id: String,
    ghost_id: String,
}

/// Error body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

fn error_response(status: StatusCode, error: String) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error,
        }),
    )
        .into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /webhooks/publish - Reshape and forward one published post
async fn handle_publish(
    State(state): State<AppState>,
    Json(payload): Json<PublishPayload>,
) -> axum::response::Response {
    let article = match Article::from_payload(payload) {
        Ok(article) => article,
        Err(e) => {
            eprintln!("Rejected webhook payload: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    println!("📰 Syncing article '{}' ({})", article.title, article.ghost_id);

    let url = format!("{}/rest/v1/articles", state.backend_url);
    let result = state
        .client
        .post(&url)
        .header("apikey", &state.service_key)
        .header("Authorization", format!("Bearer {}", state.service_key))
        .header("Prefer", "resolution=merge-duplicates")
        .json(&article)
        .send()
        .await;

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Backend request failed: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Backend request failed: {}", e),
            );
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        eprintln!("Backend rejected article: {} {}", status, body);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to insert/update article: {}", body),
        );
    }

    println!("✓ Article synced: {}", article.id);

    (
        StatusCode::OK,
        Json(SyncResponse {
            success: true,
            message: "Article synced successfully".to_string(),
            article_id: article.id,
            ghost_id: article.ghost_id,
        }),
    )
        .into_response()
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Registry Pipeline - Publish Webhook Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let backend_url = std::env::var("BACKEND_URL")
        .expect("Missing environment variable: BACKEND_URL");
    let service_key = std::env::var("BACKEND_SERVICE_KEY")
        .expect("Missing environment variable: BACKEND_SERVICE_KEY");

    let state = AppState {
        backend_url,
        service_key,
        client: reqwest::Client::new(),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/webhooks/publish", post(handle_publish))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   Webhook: POST http://localhost:3000/webhooks/publish");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
