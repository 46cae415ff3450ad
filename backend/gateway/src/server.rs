//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use nutrilens_config::NutrilensConfig;
use nutrilens_understanding::OcrProvider;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::cors::cors_layer;
use crate::health_api::{get_health, liveness};
use crate::process_image::process_image;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub ocr: Arc<dyn OcrProvider>,
    pub started_at: DateTime<Utc>,
}

impl GatewayState {
    pub fn new(ocr: Arc<dyn OcrProvider>) -> Self {
        Self {
            ocr,
            started_at: Utc::now(),
        }
    }
}

/// Build the gateway router with all routes and middleware.
pub fn build_router(state: GatewayState, config: &NutrilensConfig) -> Router {
    Router::new()
        .route("/process-image", post(process_image))
        .route("/health", get(liveness))
        .route("/api/health", get(get_health))
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the gateway on the configured address and serves until Ctrl-C.
#[instrument(skip_all)]
pub async fn start_server(config: &NutrilensConfig, state: GatewayState) -> Result<()> {
    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid bind address: {addr}"))?;

    let app = build_router(state, config);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Gateway HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nutrilens_understanding::OcrError;
    use reqwest::multipart::{Form, Part};
    use serde_json::{json, Value};

    enum StubOcr {
        Text(&'static str),
        Fail,
    }

    #[async_trait]
    impl OcrProvider for StubOcr {
        fn name(&self) -> &str {
            "stub"
        }

        async fn detect_document_text(&self, _image: &[u8]) -> Result<String, OcrError> {
            match self {
                StubOcr::Text(text) => Ok(text.to_string()),
                StubOcr::Fail => Err(OcrError::Api {
                    code: 13,
                    message: "backend unavailable".to_string(),
                }),
            }
        }
    }

    async fn spawn_with(ocr: StubOcr, config: NutrilensConfig) -> String {
        let state = GatewayState::new(Arc::new(ocr));
        let app = build_router(state, &config);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn spawn(ocr: StubOcr) -> String {
        spawn_with(ocr, NutrilensConfig::default()).await
    }

    fn image_form() -> Form {
        let part = Part::bytes(vec![0x89, b'P', b'N', b'G'])
            .file_name("label.png")
            .mime_str("image/png")
            .unwrap();
        Form::new().part("File", part)
    }

    #[tokio::test]
    async fn process_image_returns_record() {
        let base = spawn(StubOcr::Text("Calories 250\nTotal Fat 10g 15%\nSodium 200mg 9%")).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/process-image"))
            .multipart(image_form())
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-type"], "application/json");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(
            body,
            json!({
                "Calories": "250",
                "Total Fat": "10",
                "Sodium": "200",
                "Daily Value": { "Total Fat %": 15, "Total Carbohydrate %": 9 }
            })
        );
    }

    #[tokio::test]
    async fn image_without_text_gives_empty_object() {
        let base = spawn(StubOcr::Text("")).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/process-image"))
            .multipart(image_form())
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    async fn other_fields_are_skipped() {
        let base = spawn(StubOcr::Text("Protein 5g")).await;
        let form = Form::new()
            .text("note", "front of box")
            .part("File", Part::bytes(vec![1, 2, 3]).file_name("a.jpg"));

        let resp = reqwest::Client::new()
            .post(format!("{base}/process-image"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "Protein": "5" }));
    }

    #[tokio::test]
    async fn missing_file_field_is_bad_request() {
        let base = spawn(StubOcr::Text("Protein 5g")).await;
        let form = Form::new().part("image", Part::bytes(vec![1, 2, 3]).file_name("a.jpg"));

        let resp = reqwest::Client::new()
            .post(format!("{base}/process-image"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "error": "No image file provided" }));
    }

    #[tokio::test]
    async fn text_field_named_file_is_not_an_upload() {
        let base = spawn(StubOcr::Text("Protein 5g")).await;
        let form = Form::new().text("File", "Protein 5g");

        let resp = reqwest::Client::new()
            .post(format!("{base}/process-image"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "error": "No image file provided" }));
    }

    #[tokio::test]
    async fn non_multipart_body_is_bad_request() {
        let base = spawn(StubOcr::Text("Protein 5g")).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/process-image"))
            .json(&json!({ "File": "not a form" }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Failed to parse form data" }));
    }

    #[tokio::test]
    async fn ocr_failure_is_internal_error() {
        let base = spawn(StubOcr::Fail).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/process-image"))
            .multipart(image_form())
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Failed to process image" }));
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let mut config = NutrilensConfig::default();
        config.server.max_upload_bytes = 1024;
        let base = spawn_with(StubOcr::Text("Protein 5g"), config).await;
        let form = Form::new().part("File", Part::bytes(vec![7u8; 4 * 1024]).file_name("big.png"));

        let resp = reqwest::Client::new()
            .post(format!("{base}/process-image"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 413);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "error": "Image file too large" }));
    }

    #[tokio::test]
    async fn get_on_process_image_is_method_not_allowed() {
        let base = spawn(StubOcr::Text("")).await;
        let resp = reqwest::get(format!("{base}/process-image")).await.unwrap();
        assert_eq!(resp.status(), 405);
    }

    #[tokio::test]
    async fn liveness_says_ok() {
        let base = spawn(StubOcr::Text("")).await;
        let resp = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "OK");
    }

    #[tokio::test]
    async fn api_health_reports_provider() {
        let base = spawn(StubOcr::Text("")).await;
        let body: Value = reqwest::get(format!("{base}/api/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "nutrilens");
        assert_eq!(body["ocr_provider"], "stub");
        assert!(body["uptime_seconds"].is_u64());
    }

    #[tokio::test]
    async fn cors_allows_configured_origins_only() {
        let base = spawn(StubOcr::Text("")).await;
        let client = reqwest::Client::new();

        let allowed = client
            .get(format!("{base}/health"))
            .header("Origin", "https://nutri.vercel.app")
            .send()
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()["access-control-allow-origin"],
            "https://nutri.vercel.app"
        );
        assert_eq!(allowed.headers()["access-control-allow-credentials"], "true");

        let refused = client
            .get(format!("{base}/health"))
            .header("Origin", "https://example.com")
            .send()
            .await
            .unwrap();
        assert!(refused.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn cors_preflight_lists_methods() {
        let base = spawn(StubOcr::Text("")).await;
        let resp = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{base}/process-image"))
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let methods = resp.headers()["access-control-allow-methods"].to_str().unwrap();
        assert!(methods.contains("POST"), "{methods}");
        assert_eq!(
            resp.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }
}
