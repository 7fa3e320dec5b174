use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::rejection::JsonRejection;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use internlink::error::AppError;
use internlink::workflows::accounts::{account_router, AccountRepository, AccountService, TokenAuthority};
use internlink::workflows::eligibility::{screen_roster, EligibilityEvaluator, RosterReport};
use internlink::workflows::profiles::{profile_router, CandidateProfileService, ProfileRepository};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct RosterRequest {
    pub(crate) csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn with_service_routes<A, P>(
    accounts: Arc<AccountService<A>>,
    profiles: Arc<CandidateProfileService<P>>,
    tokens: Arc<TokenAuthority>,
) -> axum::Router
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
{
    account_router(accounts)
        .merge(profile_router(profiles, tokens))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/eligibility/roster",
            axum::routing::post(roster_endpoint),
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

/// Screen an uploaded CSV roster without storing anything.
pub(crate) async fn roster_endpoint(
    Extension(evaluator): Extension<EligibilityEvaluator>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> Result<Json<RosterReport>, AppError> {
    let Json(RosterRequest { csv, today }) = payload?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let report = screen_roster(Cursor::new(csv.into_bytes()), &evaluator, today)?;
    info!(
        screened = report.screenings.len(),
        eligible = report.eligible,
        "roster screened"
    );
    Ok(Json(report))
}
