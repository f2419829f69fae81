use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use fitrep_rv::error::AppError;
use fitrep_rv::workflows::fitrep::{
    profile_router, BaselineProfile, ProfileSession, RecalculationView,
};
use fitrep_rv::workflows::gradesheet::GradeSheetImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct SheetRecalculationRequest {
    pub(crate) baseline: BaselineProfile,
    pub(crate) grade_sheet: String,
    #[serde(default)]
    pub(crate) unround: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SheetRecalculationResponse {
    pub(crate) today: NaiveDate,
    #[serde(flatten)]
    pub(crate) view: RecalculationView,
    pub(crate) summary: String,
}

pub(crate) fn with_profile_routes() -> axum::Router {
    profile_router()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/profile/sheet",
            axum::routing::post(sheet_recalculation_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Replays an uploaded CSV grade sheet, in row order, against a baseline.
pub(crate) async fn sheet_recalculation_endpoint(
    Json(payload): Json<SheetRecalculationRequest>,
) -> Result<Json<SheetRecalculationResponse>, AppError> {
    let SheetRecalculationRequest {
        baseline,
        grade_sheet,
        unround,
        today,
    } = payload;

    let submissions = GradeSheetImporter::from_reader(Cursor::new(grade_sheet.into_bytes()))?;
    let mut session = ProfileSession::new(baseline, unround.unwrap_or(true))?;
    session.submit_batch(&submissions)?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let summary = session.summary().dated(today).to_string();

    Ok(Json(SheetRecalculationResponse {
        today,
        view: session.view(),
        summary,
    }))
}
