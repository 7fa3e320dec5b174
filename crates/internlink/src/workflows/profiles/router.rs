use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Map, Value};

use super::repository::ProfileRepository;
use super::service::{CandidateProfileService, ProfileServiceError};
use crate::workflows::accounts::{Session, SessionError, TokenAuthority};
use crate::workflows::eligibility::CandidateProfile;

/// Shared state for the candidate endpoints.
pub struct ProfileRouterState<P> {
    pub service: Arc<CandidateProfileService<P>>,
    pub tokens: Arc<TokenAuthority>,
}

impl<P> Clone for ProfileRouterState<P> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

/// Router builder exposing the bearer-authenticated candidate endpoints.
pub fn profile_router<P>(
    service: Arc<CandidateProfileService<P>>,
    tokens: Arc<TokenAuthority>,
) -> Router
where
    P: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/candidate/profile",
            get(fetch_handler::<P>)
                .post(save_handler::<P>)
                .put(save_handler::<P>),
        )
        .route("/api/candidate/data", post(submit_handler::<P>))
        .route(
            "/api/candidate/eligibility",
            get(eligibility_handler::<P>).post(assess_handler::<P>),
        )
        .with_state(ProfileRouterState { service, tokens })
}

pub(crate) async fn fetch_handler<P>(
    State(state): State<ProfileRouterState<P>>,
    headers: HeaderMap,
) -> Response
where
    P: ProfileRepository + 'static,
{
    let session = match authenticate(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.service.fetch(&session) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_handler<P>(
    State(state): State<ProfileRouterState<P>>,
    headers: HeaderMap,
    payload: Result<axum::Json<CandidateProfile>, JsonRejection>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    let session = match authenticate(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let axum::Json(profile) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match state.service.save(&session, profile) {
        Ok(snapshot) => {
            let payload = json!({
                "message": "Profile saved successfully",
                "profile": snapshot.record,
                "eligibility": snapshot.eligibility,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<P>(
    State(state): State<ProfileRouterState<P>>,
    headers: HeaderMap,
    payload: Result<axum::Json<Map<String, Value>>, JsonRejection>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    let session = match authenticate(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let axum::Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match state.service.submit(&session, body) {
        Ok(receipt) => {
            let payload = json!({
                "message": "Candidate data added successfully",
                "profile": receipt.record,
                "eligibility": receipt.eligibility,
                "droppedKeys": receipt.dropped_keys,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligibility_handler<P>(
    State(state): State<ProfileRouterState<P>>,
    headers: HeaderMap,
) -> Response
where
    P: ProfileRepository + 'static,
{
    let session = match authenticate(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.service.eligibility(&session) {
        Ok(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assess_handler<P>(
    State(state): State<ProfileRouterState<P>>,
    headers: HeaderMap,
    payload: Result<axum::Json<CandidateProfile>, JsonRejection>,
) -> Response
where
    P: ProfileRepository + 'static,
{
    let session = match authenticate(&state, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };
    let axum::Json(profile) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match state.service.assess(&session, &profile) {
        Ok(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        Err(error) => error_response(error),
    }
}

fn authenticate<P>(state: &ProfileRouterState<P>, headers: &HeaderMap) -> Result<Session, Response> {
    state.tokens.authenticate(headers).map_err(unauthorized)
}

fn unauthorized(error: SessionError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}

/// Bodies are only inspected after authentication so a missing token always wins.
fn rejected_body(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn error_response(error: ProfileServiceError) -> Response {
    let status = match &error {
        ProfileServiceError::Forbidden { .. } => StatusCode::FORBIDDEN,
        ProfileServiceError::NotFound => StatusCode::NOT_FOUND,
        ProfileServiceError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        ProfileServiceError::Repository(_) => {
            tracing::error!(%error, "profile request failed");
            let payload = json!({ "error": "internal server error" });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
