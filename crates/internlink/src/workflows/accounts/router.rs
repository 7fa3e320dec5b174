use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::{LoginRequest, LoginResponse, RegistrationRequest};
use super::repository::AccountRepository;
use super::service::{AccountService, AccountServiceError};

/// Router builder exposing registration and login.
pub fn account_router<R>(service: Arc<AccountService<R>>) -> Router
where
    R: AccountRepository + 'static,
{
    Router::new()
        .route("/api/auth/register", post(register_handler::<R>))
        .route("/api/auth/signup", post(register_handler::<R>))
        .route("/api/auth/login", post(login_handler::<R>))
        .with_state(service)
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    payload: Result<axum::Json<RegistrationRequest>, JsonRejection>,
) -> Response
where
    R: AccountRepository + 'static,
{
    let axum::Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match service.register(request) {
        Ok(_) => {
            let payload = json!({ "message": "User registered successfully" });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<AccountService<R>>>,
    payload: Result<axum::Json<LoginRequest>, JsonRejection>,
) -> Response
where
    R: AccountRepository + 'static,
{
    let axum::Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejected_body(rejection),
    };

    match service.login(request) {
        Ok(outcome) => {
            let body = LoginResponse {
                message: "Login successful",
                token: outcome.token,
                user: outcome.account.view(),
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn rejected_body(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn error_response(error: AccountServiceError) -> Response {
    match error {
        AccountServiceError::RoleMismatch {
            registered,
            requested,
        } => {
            let payload = json!({
                "error": error.to_string(),
                "registeredRole": registered,
                "requestedRole": requested,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        AccountServiceError::Validation(_)
        | AccountServiceError::EmailTaken
        | AccountServiceError::PhoneTaken
        | AccountServiceError::UnknownAccount
        | AccountServiceError::InvalidCredentials => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        AccountServiceError::Password(_)
        | AccountServiceError::Token(_)
        | AccountServiceError::Repository(_) => {
            tracing::error!(%error, "account request failed");
            let payload = json!({ "error": "internal server error" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
