use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::contract::project_submission;
use super::repository::{ProfileRepository, StoredProfile};
use crate::workflows::accounts::{Role, Session};
use crate::workflows::eligibility::{CandidateProfile, EligibilityEvaluator, EligibilityStatus};
use crate::workflows::repository::RepositoryError;

/// Service storing candidate profiles and evaluating them against the scheme rules.
pub struct CandidateProfileService<P> {
    repository: Arc<P>,
    evaluator: EligibilityEvaluator,
    today: fn() -> NaiveDate,
}

/// Stored profile together with its eligibility at the time of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub record: StoredProfile,
    pub eligibility: EligibilityStatus,
}

/// Outcome of a final submission, including the keys that were not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub record: StoredProfile,
    pub eligibility: EligibilityStatus,
    pub dropped_keys: Vec<String>,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<P> CandidateProfileService<P>
where
    P: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<P>, evaluator: EligibilityEvaluator) -> Self {
        Self {
            repository,
            evaluator,
            today: local_today,
        }
    }

    /// Replace the clock used for age calculations.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn evaluator(&self) -> &EligibilityEvaluator {
        &self.evaluator
    }

    pub fn fetch(&self, session: &Session) -> Result<StoredProfile, ProfileServiceError> {
        ensure_candidate(session)?;
        self.repository
            .fetch(session.account_id)?
            .ok_or(ProfileServiceError::NotFound)
    }

    /// Save a draft profile, replacing whatever was stored before.
    pub fn save(
        &self,
        session: &Session,
        profile: CandidateProfile,
    ) -> Result<ProfileSnapshot, ProfileServiceError> {
        ensure_candidate(session)?;
        let record = self.store(session, profile)?;
        let eligibility = self.evaluate(&record.profile);
        info!(
            account_id = %session.account_id,
            overall = eligibility.overall.label(),
            "candidate profile saved"
        );
        Ok(ProfileSnapshot {
            record,
            eligibility,
        })
    }

    /// Final submission: shape the payload to the stored key set, then save it wholesale.
    pub fn submit(
        &self,
        session: &Session,
        body: Map<String, Value>,
    ) -> Result<SubmissionReceipt, ProfileServiceError> {
        ensure_candidate(session)?;
        let projection = project_submission(body)?;
        if !projection.dropped_keys.is_empty() {
            warn!(
                account_id = %session.account_id,
                dropped = ?projection.dropped_keys,
                "submission carried keys outside the stored contract"
            );
        }

        let record = self.store(session, projection.profile)?;
        let eligibility = self.evaluate(&record.profile);
        info!(
            account_id = %session.account_id,
            overall = eligibility.overall.label(),
            "candidate data submitted"
        );
        Ok(SubmissionReceipt {
            record,
            eligibility,
            dropped_keys: projection.dropped_keys,
        })
    }

    /// Eligibility of the stored profile; an empty profile when nothing is stored yet.
    pub fn eligibility(&self, session: &Session) -> Result<EligibilityStatus, ProfileServiceError> {
        ensure_candidate(session)?;
        let profile = self
            .repository
            .fetch(session.account_id)?
            .map(|record| record.profile)
            .unwrap_or_default();
        Ok(self.evaluate(&profile))
    }

    /// Evaluate a profile without storing it.
    pub fn assess(
        &self,
        session: &Session,
        profile: &CandidateProfile,
    ) -> Result<EligibilityStatus, ProfileServiceError> {
        ensure_candidate(session)?;
        Ok(self.evaluate(profile))
    }

    fn evaluate(&self, profile: &CandidateProfile) -> EligibilityStatus {
        self.evaluator.evaluate(profile, (self.today)())
    }

    fn store(
        &self,
        session: &Session,
        profile: CandidateProfile,
    ) -> Result<StoredProfile, ProfileServiceError> {
        let now = Utc::now();
        let created_at = self
            .repository
            .fetch(session.account_id)?
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        let record = self.repository.upsert(StoredProfile {
            account_id: session.account_id,
            profile,
            created_at,
            updated_at: now,
        })?;
        Ok(record)
    }
}

fn ensure_candidate(session: &Session) -> Result<(), ProfileServiceError> {
    match session.role {
        Role::Candidate => Ok(()),
        role => {
            warn!(account_id = %session.account_id, %role, "non-candidate on candidate endpoint");
            Err(ProfileServiceError::Forbidden { role })
        }
    }
}

/// Error raised by the candidate profile service.
#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("{role} accounts cannot manage candidate profiles")]
    Forbidden { role: Role },
    #[error("profile not found")]
    NotFound,
    #[error("invalid candidate data: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
