use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use super::domain::{AccountId, Role};
use super::token::{TokenAuthority, TokenError};

/// Authenticated caller, decoded from the `Authorization: Bearer` header and handed to
/// every protected operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub account_id: AccountId,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("authorization header must use the Bearer scheme")]
    MalformedHeader,
    #[error(transparent)]
    Token(#[from] TokenError),
}

pub fn bearer_token(headers: &HeaderMap) -> Result<&str, SessionError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(SessionError::MissingToken)?
        .to_str()
        .map_err(|_| SessionError::MalformedHeader)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(SessionError::MalformedHeader)?
        .trim();
    if token.is_empty() {
        return Err(SessionError::MissingToken);
    }
    Ok(token)
}

impl TokenAuthority {
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Session, SessionError> {
        let token = bearer_token(headers)?;
        let session = self.verify(token).map_err(|err| {
            tracing::warn!(reason = %err, "rejected bearer token");
            err
        })?;
        Ok(session)
    }
}
