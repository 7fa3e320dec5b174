use super::domain::{Account, AccountId};
use crate::workflows::repository::RepositoryError;

/// Storage abstraction for accounts so the service can run against any backend.
pub trait AccountRepository: Send + Sync {
    /// Fails with `Conflict` when the email or phone is already registered.
    fn insert(&self, account: Account) -> Result<Account, RepositoryError>;
    fn fetch(&self, id: AccountId) -> Result<Option<Account>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;
    fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, RepositoryError>;
}
