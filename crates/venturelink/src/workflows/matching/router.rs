use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{InvestorProfile, ProjectCandidate};
use super::explain::explain_match;
use super::scoring::score_candidate;
use super::service::rank_with_reasons;

#[derive(Debug, Clone, Copy)]
pub(crate) struct MatchingSettings {
    default_min_score: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    profile: InvestorProfile,
    candidates: Vec<ProjectCandidate>,
    #[serde(default)]
    min_score: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExplainRequest {
    profile: InvestorProfile,
    candidate: ProjectCandidate,
}

/// Router builder exposing the scorer over HTTP.
pub fn matching_router(default_min_score: u8) -> Router {
    Router::new()
        .route("/api/v1/matching/rank", post(rank_handler))
        .route("/api/v1/matching/explain", post(explain_handler))
        .with_state(MatchingSettings { default_min_score })
}

pub(crate) async fn rank_handler(
    State(settings): State<MatchingSettings>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response {
    let min_score = request.min_score.unwrap_or(settings.default_min_score);
    if min_score > 100 {
        let payload = json!({
            "error": "min_score must be between 0 and 100",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let total = request.candidates.len();
    let matches = rank_with_reasons(&request.profile, request.candidates, min_score);
    let payload = json!({
        "min_score": min_score,
        "total": total,
        "matches": matches,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn explain_handler(axum::Json(request): axum::Json<ExplainRequest>) -> Response {
    let score = score_candidate(&request.profile, &request.candidate);
    let reasons = explain_match(&request.profile, &request.candidate);
    let payload = json!({
        "score": score.score,
        "components": score.components,
        "reasons": reasons,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
