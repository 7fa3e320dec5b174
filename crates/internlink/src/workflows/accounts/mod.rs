//! Registration, login and bearer-token sessions.

pub mod domain;
pub mod password;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;
pub mod token;

#[cfg(test)]
mod tests;

pub use domain::{
    Account, AccountId, AccountView, LoginRequest, LoginResponse, RegistrationRequest, Role,
};
pub use password::{hash_password, verify_password, PasswordError};
pub use repository::AccountRepository;
pub use router::account_router;
pub use service::{AccountService, AccountServiceError, LoginOutcome};
pub use session::{Session, SessionError};
pub use token::{Claims, TokenAuthority, TokenError};
