use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::DraftRecord;
use super::validation::{validate_step, VALIDATION_NOTICE};
use super::wizard::WizardStep;

/// Stateless endpoints letting a UI shell run step validation server-side.
pub fn investor_application_router() -> Router {
    Router::new().route(
        "/api/v1/investor-application/steps/:step/validate",
        post(validate_handler),
    )
}

pub(crate) async fn validate_handler(
    Path(step): Path<String>,
    axum::Json(record): axum::Json<DraftRecord>,
) -> Response {
    let Some(step) = WizardStep::parse(&step) else {
        let payload = json!({
            "error": format!("unknown wizard step `{step}`"),
        });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    match validate_step(step, &record) {
        Ok(()) => {
            let payload = json!({
                "step": step.slug(),
                "valid": true,
                "next": step.next().map(WizardStep::slug),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(errors) => {
            let payload = json!({
                "step": step.slug(),
                "valid": false,
                "message": VALIDATION_NOTICE,
                "errors": errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
