use chrono::NaiveDate;

use crate::workflows::eligibility::{CandidateProfile, EligibilityEvaluator};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

pub(super) fn evaluator() -> EligibilityEvaluator {
    EligibilityEvaluator::default()
}

pub(super) fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Twenty-two year old Delhi University engineering student who clears every rule.
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

pub(super) fn born_on(date: &str) -> CandidateProfile {
    CandidateProfile {
        date_of_birth: text(date),
        ..eligible_profile()
    }
}
