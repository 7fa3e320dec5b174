use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::workflows::accounts::AccountId;
use crate::workflows::eligibility::CandidateProfile;
use crate::workflows::repository::RepositoryError;

/// Profile as persisted for one account. Serializes flat, with the timestamps alongside the
/// profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub account_id: AccountId,
    #[serde(flatten)]
    pub profile: CandidateProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction for candidate profiles, one per account.
pub trait ProfileRepository: Send + Sync {
    fn fetch(&self, account_id: AccountId) -> Result<Option<StoredProfile>, RepositoryError>;
    /// Replace any existing record for the account.
    fn upsert(&self, record: StoredProfile) -> Result<StoredProfile, RepositoryError>;
}
