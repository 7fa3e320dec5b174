use super::common::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::workflows::eligibility::{
    CandidateProfile, Criterion, CriterionVerdict, EligibilityEvaluator, OverallStatus,
};
use crate::workflows::profiles::{CandidateProfileService, ProfileServiceError};
use crate::workflows::repository::RepositoryError;

#[test]
fn fetch_before_save_reports_not_found() {
    let (service, _) = build_service();

    let err = service.fetch(&candidate()).expect_err("nothing stored");

    assert!(matches!(err, ProfileServiceError::NotFound));
    assert_eq!(err.to_string(), "profile not found");
}

#[test]
fn save_stores_profile_and_returns_eligibility() {
    let (service, repository) = build_service();

    let snapshot = service
        .save(&candidate(), eligible_profile())
        .expect("save succeeds");

    assert_eq!(snapshot.eligibility.overall, OverallStatus::Eligible);
    assert_eq!(snapshot.record.profile, eligible_profile());
    let stored = repository
        .records
        .lock()
        .unwrap()
        .get(&candidate().account_id)
        .cloned()
        .expect("record stored");
    assert_eq!(stored, snapshot.record);
    assert_eq!(
        service.fetch(&candidate()).expect("fetch succeeds"),
        snapshot.record
    );
}

#[test]
fn saving_again_replaces_profile_and_keeps_creation_time() {
    let (service, _) = build_service();
    let first = service
        .save(&candidate(), eligible_profile())
        .expect("first save");

    let revised = CandidateProfile {
        family_income: text("8-15-lakh"),
        ..CandidateProfile::default()
    };
    let second = service.save(&candidate(), revised.clone()).expect("second save");

    assert_eq!(second.record.created_at, first.record.created_at);
    assert!(second.record.updated_at >= first.record.updated_at);
    assert_eq!(second.record.profile, revised);
    assert_eq!(second.eligibility.overall, OverallStatus::NotEligible);
}

#[test]
fn eligibility_without_stored_profile_is_all_pending() {
    let (service, _) = build_service();

    let status = service.eligibility(&candidate()).expect("evaluated");

    assert_eq!(status.overall, OverallStatus::Pending);
    assert!(status
        .criteria
        .values()
        .all(|verdict| *verdict == CriterionVerdict::Pending));
    assert!(status.issues.is_empty());
}

#[test]
fn assess_does_not_store_anything() {
    let (service, repository) = build_service();

    let status = service
        .assess(&candidate(), &eligible_profile())
        .expect("evaluated");

    assert!(status.is_eligible());
    assert!(repository.records.lock().unwrap().is_empty());
}

#[test]
fn submit_projects_payload_before_storing() {
    let (service, _) = build_service();
    let mut body: Map<String, Value> = match serde_json::to_value(eligible_profile()) {
        Ok(Value::Object(map)) => map,
        _ => panic!("profile serializes to an object"),
    };
    body.insert("class12Stream".to_string(), json!("science"));

    let receipt = service.submit(&candidate(), body).expect("submit succeeds");

    assert_eq!(receipt.dropped_keys, vec!["class12Stream"]);
    assert_eq!(receipt.eligibility.overall, OverallStatus::Eligible);
    assert_eq!(receipt.record.profile.city.as_deref(), Some(""));
    assert_eq!(receipt.record.profile.class12_stream, None);
}

#[test]
fn submit_with_defaults_only_waits_on_date_of_birth() {
    let (service, _) = build_service();

    let receipt = service
        .submit(&candidate(), Map::new())
        .expect("submit succeeds");

    let criteria = &receipt.eligibility.criteria;
    assert_eq!(criteria[&Criterion::Age], CriterionVerdict::Pending);
    assert_eq!(criteria[&Criterion::Citizenship], CriterionVerdict::Eligible);
    assert_eq!(criteria[&Criterion::Employment], CriterionVerdict::Eligible);
    assert_eq!(receipt.eligibility.overall, OverallStatus::Pending);
}

#[test]
fn recruiters_are_forbidden_everywhere() {
    let (service, _) = build_service();
    let session = recruiter();

    assert!(matches!(
        service.fetch(&session),
        Err(ProfileServiceError::Forbidden { .. })
    ));
    assert!(matches!(
        service.save(&session, eligible_profile()),
        Err(ProfileServiceError::Forbidden { .. })
    ));
    assert!(matches!(
        service.submit(&session, Map::new()),
        Err(ProfileServiceError::Forbidden { .. })
    ));
    assert!(matches!(
        service.eligibility(&session),
        Err(ProfileServiceError::Forbidden { .. })
    ));
    assert!(matches!(
        service.assess(&session, &eligible_profile()),
        Err(ProfileServiceError::Forbidden { .. })
    ));
}

#[test]
fn repository_failures_propagate() {
    let service = CandidateProfileService::new(
        Arc::new(UnavailableProfiles),
        EligibilityEvaluator::default(),
    )
    .with_clock(today);

    assert!(matches!(
        service.save(&candidate(), eligible_profile()),
        Err(ProfileServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(matches!(
        service.eligibility(&candidate()),
        Err(ProfileServiceError::Repository(_))
    ));
}
