pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Request bodies carry whole resumes; allow up to 10 MB.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/parse-resume", post(handlers::handle_parse_resume))
        .route("/api/match-job", post(handlers::handle_match_job))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::test_support::FakeGenerator;

    fn router() -> Router {
        build_router(AppState {
            generator: Arc::new(FakeGenerator::replying("{}")),
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_analysis_routes_reject_get() {
        for uri in ["/api/parse-resume", "/api/match-job"] {
            let response = router()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = router()
            .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_body_over_limit_is_413_without_generation_call() {
        let generator = Arc::new(FakeGenerator::replying("{}"));
        let router = build_router(AppState {
            generator: generator.clone(),
        });
        let body = json!({ "text": "a".repeat(MAX_BODY_BYTES + 1024 * 1024) }).to_string();

        let response = router
            .oneshot(
                Request::post("/api/parse-resume")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body_json(response).await["error"].is_string());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_body_under_limit_is_accepted() {
        let generator = Arc::new(FakeGenerator::replying(
            r#"{"name": "John Doe", "skills": [], "experience": []}"#,
        ));
        let router = build_router(AppState { generator });
        let body = json!({ "text": "a".repeat(MAX_BODY_BYTES - 1024) }).to_string();

        let response = router
            .oneshot(
                Request::post("/api/parse-resume")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_json_content_type_is_415() {
        let response = router()
            .oneshot(
                Request::post("/api/match-job")
                    .body(Body::from(r#"{"resumeText": "a", "jobDescription": "b"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body_json(response).await["error"].is_string());
    }
}
