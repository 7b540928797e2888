//! Axum application setup.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::handlers;
use super::state::AppState;
use crate::web::static_handler;

/// Largest records file accepted by the upload route.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Session
        .route("/session", get(handlers::get_session))
        .route("/save", post(handlers::save_session))
        .route(
            "/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Navigation and scoring
        .route("/previous", post(handlers::go_previous))
        .route("/next", post(handlers::go_next))
        .route("/mark", post(handlers::set_mark))
        // Export
        .route("/export", post(handlers::export))
        .route("/download", get(handlers::download));

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use briefmark::{ReloadPolicy, ReviewConfig, SessionSlot};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const CASES: &str = r#"[
        {"description": "Истец требует возврата долга.", "short_description": "Возврат долга", "id": 1},
        {"description": "Appeal against a fine.", "short_description": "Fine appeal", "id": 2},
        {"description": "Dispute over a lease.", "short_description": "Lease dispute", "id": 3}
    ]"#;

    fn test_state(dir: &TempDir, policy: ReloadPolicy) -> AppState {
        let config = ReviewConfig::new()
            .with_output_dir(dir.path())
            .with_reload_policy(policy);
        AppState::new(SessionSlot::new(policy), config)
    }

    async fn send(state: &AppState, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn post(state: &AppState, uri: &str) -> (StatusCode, Value) {
        send(state, Method::POST, uri, Body::empty()).await
    }

    async fn post_mark(state: &AppState, mark: i64) -> (StatusCode, Value) {
        let body = Body::from(json!({ "mark": mark }).to_string());
        send(state, Method::POST, "/api/mark", body).await
    }

    async fn upload(state: &AppState, name: &str, content: &str) -> (StatusCode, Value) {
        let uri = format!("/api/upload?name={}", name);
        send(state, Method::POST, &uri, Body::from(content.to_string())).await
    }

    #[tokio::test]
    async fn test_session_before_upload_is_not_found() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());

        let (status, body) = send(&state, Method::GET, "/api/session", Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_upload_creates_session() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());

        let (status, body) = upload(&state, "cases.json", CASES).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "created");
        assert_eq!(body["view"]["position"], 1);
        assert_eq!(body["view"]["total"], 3);
        assert_eq!(body["view"]["short_description"], "Возврат долга");
        assert_eq!(body["view"]["can_go_next"], false);
        assert_eq!(body["view"]["export_name"], "marked_cases.json");
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_input() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());

        let (status, body) = upload(&state, "cases.json", "{\"oops\": true}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Please upload a valid JSON file"));

        let (status, _) = upload(&state, "cases.txt", CASES).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&state, Method::GET, "/api/session", Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reupload_same_file_keeps_progress() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::ResetOnNewSource);

        upload(&state, "cases.json", CASES).await;
        post_mark(&state, 4).await;

        let (_, body) = upload(&state, "cases.json", CASES).await;
        assert_eq!(body["outcome"], "kept");
        assert_eq!(body["view"]["position"], 2);

        let other = CASES.replace("Lease", "Land");
        let (_, body) = upload(&state, "cases.json", &other).await;
        assert_eq!(body["outcome"], "replaced");
        assert_eq!(body["view"]["position"], 1);
        assert_eq!(body["view"]["labeled"], 0);
    }

    #[tokio::test]
    async fn test_navigation_and_marking() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());
        upload(&state, "cases.json", CASES).await;

        let (_, view) = post(&state, "/api/next").await;
        assert_eq!(view["position"], 1, "next is disabled on an unmarked record");

        let (_, view) = post_mark(&state, 4).await;
        assert_eq!(view["position"], 2);

        let (_, view) = post(&state, "/api/previous").await;
        assert_eq!(view["position"], 1);
        assert_eq!(view["mark"], 4);
        assert_eq!(view["ratings"][3]["selected"], true);
        assert_eq!(view["can_go_next"], true);

        let (_, view) = post(&state, "/api/next").await;
        assert_eq!(view["position"], 2);
    }

    #[tokio::test]
    async fn test_invalid_mark_is_rejected() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());
        upload(&state, "cases.json", CASES).await;

        let (status, body) = post_mark(&state, 6).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_mark");

        let (_, view) = send(&state, Method::GET, "/api/session", Body::empty()).await;
        assert_eq!(view["labeled"], 0);
    }

    #[tokio::test]
    async fn test_export_flow() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());
        upload(&state, "cases.json", CASES).await;

        let (status, body) = post(&state, "/api/export").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "incomplete");

        for mark in [5, 3, 1] {
            post_mark(&state, mark).await;
        }

        let (status, body) = post(&state, "/api/export").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["file_name"], "marked_cases.json");

        let written = std::fs::read_to_string(dir.path().join("marked_cases.json")).unwrap();
        assert!(written.contains("Возврат долга"));
        let exported: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(exported[0]["mark"], 5);
        assert_eq!(exported[2]["id"], 3);

        let (status, downloaded) = send(&state, Method::GET, "/api/download", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(downloaded, exported);
    }

    #[tokio::test]
    async fn test_autosave_writes_snapshot() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());
        upload(&state, "cases.json", CASES).await;
        post_mark(&state, 2).await;

        let snapshot = {
            let slot = state.slot.read().await;
            state.snapshot_path(slot.get().unwrap())
        };
        let restored = briefmark::ReviewSession::load_snapshot(&snapshot).unwrap();
        assert_eq!(restored.cursor(), 1);
        assert_eq!(restored.labeled_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_overlapping_requests_all_succeed() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());
        upload(&state, "cases.json", CASES).await;

        for round in 0..10 {
            let mut requests = Vec::new();
            for _ in 0..3 {
                let marker = state.clone();
                requests.push(tokio::spawn(async move { post_mark(&marker, 5).await }));
                let saver = state.clone();
                requests.push(tokio::spawn(async move { post(&saver, "/api/save").await }));
            }
            if round > 0 {
                let exporter = state.clone();
                requests.push(tokio::spawn(async move { post(&exporter, "/api/export").await }));
            }

            for request in requests {
                let (status, body) = request.await.unwrap();
                assert_eq!(status, StatusCode::OK, "{body}");
            }
        }

        let slot = state.slot.read().await;
        let session = slot.get().unwrap();
        let restored = briefmark::ReviewSession::load_snapshot(state.snapshot_path(session)).unwrap();
        assert_eq!(&restored, session);
    }

    #[tokio::test]
    async fn test_unknown_paths_serve_the_ui() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir, ReloadPolicy::default());

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "text/html"
        );
    }
}
