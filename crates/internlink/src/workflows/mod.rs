pub mod accounts;
pub mod eligibility;
pub mod profiles;
pub mod repository;

pub use repository::RepositoryError;
