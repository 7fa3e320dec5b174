use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, Request};
use axum::response::Response;
use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::workflows::accounts::domain::{Account, AccountId, Role};
use crate::workflows::accounts::{Session, TokenAuthority};
use crate::workflows::eligibility::{CandidateProfile, EligibilityEvaluator};
use crate::workflows::profiles::{CandidateProfileService, ProfileRepository, StoredProfile};
use crate::workflows::repository::RepositoryError;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

pub(super) fn candidate() -> Session {
    Session {
        account_id: AccountId(7),
        email: "asha@example.com".to_string(),
        role: Role::Candidate,
    }
}

pub(super) fn recruiter() -> Session {
    Session {
        account_id: AccountId(8),
        email: "ravi@acme.in".to_string(),
        role: Role::Recruiter,
    }
}

pub(super) fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

pub(super) fn eligible_profile() -> CandidateProfile {
    CandidateProfile {
        full_name: text("Asha Verma"),
        date_of_birth: text("2004-05-02"),
        citizenship: text("indian"),
        highest_degree: text("btech"),
        institution: text("Delhi University"),
        family_income: text("3-5-lakh"),
        currently_employed: Some(false),
        govt_employee: Some(false),
        pm_internship_previous: Some(false),
        pm_skilling_previous: Some(false),
        nats_naps_training: Some(false),
        other_govt_scheme: Some(false),
        ..CandidateProfile::default()
    }
}

pub(super) fn build_service() -> (CandidateProfileService<MemoryProfiles>, Arc<MemoryProfiles>) {
    let repository = Arc::new(MemoryProfiles::default());
    let service = CandidateProfileService::new(repository.clone(), EligibilityEvaluator::default())
        .with_clock(today);
    (service, repository)
}

pub(super) fn authority() -> Arc<TokenAuthority> {
    Arc::new(TokenAuthority::new("test-secret-with-at-least-32-bytes!!", 24))
}

/// Bearer header value for a session, signed by [`authority`].
pub(super) fn bearer(session: &Session) -> HeaderValue {
    let account = Account {
        id: session.account_id,
        full_name: "Test Account".to_string(),
        email: session.email.clone(),
        phone: "9000000000".to_string(),
        organization: None,
        role: session.role,
        password_hash: String::new(),
        created_at: Utc::now(),
    };
    let token = authority().issue(&account).expect("token issued");
    HeaderValue::from_str(&format!("Bearer {token}")).expect("header value")
}

pub(super) fn authorized<B>(mut request: Request<B>, session: &Session) -> Request<B> {
    request
        .headers_mut()
        .insert(AUTHORIZATION, bearer(session));
    request
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    pub(super) records: Arc<Mutex<HashMap<AccountId, StoredProfile>>>,
}

impl ProfileRepository for MemoryProfiles {
    fn fetch(&self, account_id: AccountId) -> Result<Option<StoredProfile>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&account_id).cloned())
    }

    fn upsert(&self, record: StoredProfile) -> Result<StoredProfile, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.account_id, record.clone());
        Ok(record)
    }
}

pub(super) struct UnavailableProfiles;

impl ProfileRepository for UnavailableProfiles {
    fn fetch(&self, _account_id: AccountId) -> Result<Option<StoredProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _record: StoredProfile) -> Result<StoredProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
