use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{Account, AccountId, LoginRequest, RegistrationRequest, Role};
use super::password::{hash_password, verify_password, PasswordError};
use super::repository::AccountRepository;
use super::token::{TokenAuthority, TokenError};
use crate::workflows::repository::RepositoryError;

/// Service composing the account repository, password hashing and token issuance.
pub struct AccountService<R> {
    repository: Arc<R>,
    tokens: Arc<TokenAuthority>,
}

static ACCOUNT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_account_id() -> AccountId {
    AccountId(ACCOUNT_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Successful login: the signed bearer token and the account it belongs to.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub account: Account,
}

impl<R> AccountService<R>
where
    R: AccountRepository + 'static,
{
    pub fn new(repository: Arc<R>, tokens: Arc<TokenAuthority>) -> Self {
        Self { repository, tokens }
    }

    pub fn tokens(&self) -> &Arc<TokenAuthority> {
        &self.tokens
    }

    /// Register a new account after validating the form and checking for duplicates.
    pub fn register(&self, request: RegistrationRequest) -> Result<Account, AccountServiceError> {
        let full_name = required("fullName", &request.full_name)?;
        let email = normalize_email(&request.email)?;
        let phone = required("phone", &request.phone)?;
        if request.password.is_empty() {
            return Err(AccountServiceError::Validation("password is required".to_string()));
        }
        let role = Role::parse(&request.user_type).ok_or_else(|| {
            AccountServiceError::Validation("userType must be candidate or recruiter".to_string())
        })?;

        if self.repository.find_by_email(&email)?.is_some() {
            warn!(%role, "registration rejected: email already registered");
            return Err(AccountServiceError::EmailTaken);
        }
        if self.repository.find_by_phone(&phone)?.is_some() {
            warn!(%role, "registration rejected: phone already registered");
            return Err(AccountServiceError::PhoneTaken);
        }

        let account = Account {
            id: next_account_id(),
            full_name,
            email,
            phone,
            organization: request
                .organization
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            role,
            password_hash: hash_password(&request.password)?,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(account).map_err(|err| match err {
            RepositoryError::Conflict => AccountServiceError::EmailTaken,
            other => AccountServiceError::Repository(other),
        })?;

        info!(account_id = %stored.id, role = %stored.role, "account registered");
        Ok(stored)
    }

    /// Check credentials and the selected role, then issue a bearer token.
    pub fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AccountServiceError> {
        let email = normalize_email(&request.email)?;
        let requested_role = match request.user_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Role::parse(raw).ok_or_else(|| {
                AccountServiceError::Validation(
                    "userType must be candidate or recruiter".to_string(),
                )
            })?),
        };

        let Some(account) = self.repository.find_by_email(&email)? else {
            warn!("login rejected: unknown account");
            return Err(AccountServiceError::UnknownAccount);
        };

        if !verify_password(&request.password, &account.password_hash)? {
            warn!(account_id = %account.id, "login rejected: wrong password");
            return Err(AccountServiceError::InvalidCredentials);
        }

        if let Some(requested) = requested_role {
            if requested != account.role {
                warn!(
                    account_id = %account.id,
                    registered = %account.role,
                    %requested,
                    "login rejected: role mismatch"
                );
                return Err(AccountServiceError::RoleMismatch {
                    registered: account.role,
                    requested,
                });
            }
        }

        let token = self.tokens.issue(&account)?;
        info!(account_id = %account.id, role = %account.role, "login succeeded");
        Ok(LoginOutcome { token, account })
    }
}

fn required(field: &str, value: &str) -> Result<String, AccountServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccountServiceError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn normalize_email(raw: &str) -> Result<String, AccountServiceError> {
    let email = required("email", raw)?.to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AccountServiceError::Validation(
            "email must be a valid address".to_string(),
        )),
    }
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("User already exists")]
    EmailTaken,
    #[error("Phone number already registered")]
    PhoneTaken,
    #[error("User not found")]
    UnknownAccount,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("You are registered as {registered}. Please login with that profile or register as a new {requested}.")]
    RoleMismatch { registered: Role, requested: Role },
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
