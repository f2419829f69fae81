use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::intake::GradeSubmission;
use super::profile::BaselineProfile;
use super::session::ProfileSession;
use super::unround::UnroundingLookup;

/// Replay request: a baseline plus reports in processing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculationRequest {
    pub baseline: BaselineProfile,
    #[serde(default)]
    pub reports: Vec<GradeSubmission>,
    #[serde(default = "unround_by_default")]
    pub unround: bool,
}

fn unround_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnroundQuery {
    value: f64,
}

/// Stateless profile endpoints. Every request carries its own baseline and
/// reports, so no session state is shared between callers.
pub fn profile_router() -> Router {
    Router::new()
        .route("/api/v1/profile/recalculate", post(recalculate_handler))
        .route("/api/v1/profile/unround", get(unround_handler))
}

pub(crate) async fn recalculate_handler(Json(request): Json<RecalculationRequest>) -> Response {
    let RecalculationRequest {
        baseline,
        reports,
        unround,
    } = request;

    let outcome = ProfileSession::new(baseline, unround).and_then(|mut session| {
        session.submit_batch(&reports)?;
        Ok(session.view())
    });

    match outcome {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn unround_handler(Query(query): Query<UnroundQuery>) -> Response {
    let unrounded = UnroundingLookup::new().unround(query.value);
    let payload = json!({
        "value": query.value,
        "unrounded": unrounded,
    });
    (StatusCode::OK, Json(payload)).into_response()
}
