use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::accounts::domain::{Account, AccountId, RegistrationRequest};
use crate::workflows::accounts::repository::AccountRepository;
use crate::workflows::accounts::{AccountService, TokenAuthority};
use crate::workflows::repository::RepositoryError;

pub(super) const SECRET: &str = "test-secret-with-at-least-32-bytes!!";

pub(super) fn authority() -> Arc<TokenAuthority> {
    Arc::new(TokenAuthority::new(SECRET, 24))
}

pub(super) fn candidate_registration() -> RegistrationRequest {
    RegistrationRequest {
        full_name: "Asha Verma".to_string(),
        email: "Asha@Example.com ".to_string(),
        phone: "9876543210".to_string(),
        organization: None,
        password: "correct horse".to_string(),
        user_type: "candidate".to_string(),
    }
}

pub(super) fn recruiter_registration() -> RegistrationRequest {
    RegistrationRequest {
        full_name: "Ravi Menon".to_string(),
        email: "ravi@acme.in".to_string(),
        phone: "9123456780".to_string(),
        organization: Some("Acme Logistics".to_string()),
        password: "hiring-season".to_string(),
        user_type: "recruiter".to_string(),
    }
}

pub(super) fn build_service() -> (AccountService<MemoryAccounts>, Arc<MemoryAccounts>) {
    let repository = Arc::new(MemoryAccounts::default());
    let service = AccountService::new(repository.clone(), authority());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryAccounts {
    pub(super) records: Arc<Mutex<HashMap<AccountId, Account>>>,
}

impl AccountRepository for MemoryAccounts {
    fn insert(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .values()
            .any(|existing| existing.email == account.email || existing.phone == account.phone) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(account.id, account.clone());
        Ok(account)
    }

    fn fetch(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().find(|account| account.email == email).cloned())
    }

    fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().find(|account| account.phone == phone).cloned())
    }
}

/// Lookups miss but every insert collides, as when a concurrent registration wins the race.
pub(super) struct ConflictAccounts;

impl AccountRepository for ConflictAccounts {
    fn insert(&self, _account: Account) -> Result<Account, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(None)
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(None)
    }

    fn find_by_phone(&self, _phone: &str) -> Result<Option<Account>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableAccounts;

impl AccountRepository for UnavailableAccounts {
    fn insert(&self, _account: Account) -> Result<Account, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: AccountId) -> Result<Option<Account>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<Account>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_phone(&self, _phone: &str) -> Result<Option<Account>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
