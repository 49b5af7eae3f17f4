//! Axum route handlers for the analysis API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::job_matcher::{match_job, MISSING_FIELDS};
use crate::analysis::resume_parser::{parse_resume, MISSING_TEXT};
use crate::errors::AppError;
use crate::models::{MatchResult, ResumeData};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

// Fields are optional on the wire so that a missing field surfaces as
// InvalidInput with our message instead of a deserialization rejection.

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ParseResumeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchJobRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/parse-resume
///
/// Extracts structured `ResumeData` from already-extracted resume text.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    payload: Result<Json<ParseResumeRequest>, JsonRejection>,
) -> Result<Json<ResumeData>, AppError> {
    let Json(request) = payload?;
    let text = request
        .text
        .ok_or_else(|| AppError::InvalidInput(MISSING_TEXT.to_string()))?;

    let resume = parse_resume(&text, state.generator.as_ref()).await?;
    Ok(Json(resume))
}

/// POST /api/match-job
///
/// Scores resume text against a job description.
pub async fn handle_match_job(
    State(state): State<AppState>,
    payload: Result<Json<MatchJobRequest>, JsonRejection>,
) -> Result<Json<MatchResult>, AppError> {
    let Json(request) = payload?;
    let (Some(resume_text), Some(job_description)) =
        (request.resume_text, request.job_description)
    else {
        return Err(AppError::InvalidInput(MISSING_FIELDS.to_string()));
    };

    let result = match_job(&resume_text, &job_description, state.generator.as_ref()).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::test_support::FakeGenerator;
    use crate::routes::build_router;
    use crate::state::AppState;

    const RESUME_REPLY: &str = r#"{
        "name": "John Doe", "skills": ["Python", "AWS"], "experience": [],
        "education": [], "email": "", "phone": "", "summary": ""
    }"#;

    const MATCH_REPLY: &str = r#"{
        "score": 72, "matchingSkills": ["Python"], "missingSkills": ["Go"],
        "strengths": [], "weaknesses": [], "improvementSuggestions": "- add Go",
        "overallFeedback": ""
    }"#;

    fn router_with(generator: Arc<FakeGenerator>) -> Router {
        build_router(AppState { generator })
    }

    async fn post_json(router: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_parse_resume_missing_text_is_400_without_generation_call() {
        let generator = Arc::new(FakeGenerator::replying(RESUME_REPLY));
        for body in [r#"{}"#, r#"{"text": null}"#, r#"{"text": ""}"#] {
            let (status, json) =
                post_json(router_with(generator.clone()), "/api/parse-resume", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json, json!({"error": "No text provided"}));
        }
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_resume_malformed_body_is_400() {
        let generator = Arc::new(FakeGenerator::replying(RESUME_REPLY));
        let (status, json) =
            post_json(router_with(generator.clone()), "/api/parse-resume", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_resume_wrong_field_type_is_400() {
        let generator = Arc::new(FakeGenerator::replying(RESUME_REPLY));
        let (status, json) =
            post_json(router_with(generator.clone()), "/api/parse-resume", r#"{"text": 42}"#)
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_resume_success_has_schema_shape() {
        let generator = Arc::new(FakeGenerator::replying(RESUME_REPLY));
        let (status, json) = post_json(
            router_with(generator),
            "/api/parse-resume",
            r#"{"text": "John Doe, Python, AWS"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!json["name"].as_str().unwrap().is_empty());
        assert!(json["skills"].is_array());
        assert!(json["experience"].is_array());
    }

    #[tokio::test]
    async fn test_parse_resume_fills_omitted_optional_fields() {
        let generator = Arc::new(FakeGenerator::replying(
            r#"{"name": "John Doe", "skills": [], "experience": []}"#,
        ));
        let (status, json) = post_json(
            router_with(generator),
            "/api/parse-resume",
            r#"{"text": "John Doe"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["email"], "");
        assert_eq!(json["education"], json!([]));
    }

    #[tokio::test]
    async fn test_parse_resume_upstream_failure_is_500_with_message() {
        let generator = Arc::new(FakeGenerator::failing());
        let (status, json) = post_json(
            router_with(generator),
            "/api/parse-resume",
            r#"{"text": "John Doe"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_match_job_missing_field_is_400_without_generation_call() {
        let generator = Arc::new(FakeGenerator::replying(MATCH_REPLY));
        for body in [
            r#"{"resumeText": "John Doe"}"#,
            r#"{"jobDescription": "Go developer"}"#,
            r#"{"resumeText": "", "jobDescription": "Go developer"}"#,
        ] {
            let (status, json) =
                post_json(router_with(generator.clone()), "/api/match-job", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                json,
                json!({"error": "Resume text and job description are required"})
            );
        }
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_match_job_success_has_schema_shape() {
        let generator = Arc::new(FakeGenerator::replying(MATCH_REPLY));
        let (status, json) = post_json(
            router_with(generator),
            "/api/match-job",
            r#"{"resumeText": "John Doe, Python", "jobDescription": "Go developer"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["score"].is_number());
        assert!(json["matchingSkills"]
            .as_array()
            .unwrap()
            .iter()
            .all(Value::is_string));
        assert!(json["missingSkills"].is_array());
        assert!(json["improvementSuggestions"].is_string());
    }

    #[tokio::test]
    async fn test_match_job_malformed_model_output_is_500() {
        let generator = Arc::new(FakeGenerator::replying("not json at all"));
        let (status, json) = post_json(
            router_with(generator),
            "/api/match-job",
            r#"{"resumeText": "John Doe", "jobDescription": "Go developer"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().starts_with("JSON parse error"));
    }
}
