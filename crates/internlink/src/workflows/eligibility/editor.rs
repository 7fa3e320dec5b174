use chrono::NaiveDate;

use super::domain::{CandidateProfile, EligibilityStatus};
use super::EligibilityEvaluator;

/// Draft profile whose eligibility is recomputed on every change.
///
/// Mirrors the profile builder: the status always reflects the current draft and submission is
/// only offered once the candidate is fully eligible.
#[derive(Debug, Clone)]
pub struct ProfileEditor {
    evaluator: EligibilityEvaluator,
    today: NaiveDate,
    profile: CandidateProfile,
    status: EligibilityStatus,
}

impl ProfileEditor {
    pub fn new(evaluator: EligibilityEvaluator, today: NaiveDate) -> Self {
        Self::from_profile(evaluator, CandidateProfile::default(), today)
    }

    pub fn from_profile(
        evaluator: EligibilityEvaluator,
        profile: CandidateProfile,
        today: NaiveDate,
    ) -> Self {
        let status = evaluator.evaluate(&profile, today);
        Self {
            evaluator,
            today,
            profile,
            status,
        }
    }

    pub fn profile(&self) -> &CandidateProfile {
        &self.profile
    }

    pub fn status(&self) -> &EligibilityStatus {
        &self.status
    }

    /// Apply an edit to the draft and re-evaluate.
    pub fn update<F>(&mut self, edit: F) -> &EligibilityStatus
    where
        F: FnOnce(&mut CandidateProfile),
    {
        edit(&mut self.profile);
        self.refresh()
    }

    pub fn replace(&mut self, profile: CandidateProfile) -> &EligibilityStatus {
        self.profile = profile;
        self.refresh()
    }

    pub fn add_skill(&mut self, skill: &str) -> bool {
        let changed = self.profile.add_skill(skill);
        self.refresh();
        changed
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let changed = self.profile.remove_skill(skill);
        self.refresh();
        changed
    }

    pub fn can_submit(&self) -> bool {
        self.status.is_eligible()
    }

    pub fn into_profile(self) -> CandidateProfile {
        self.profile
    }

    fn refresh(&mut self) -> &EligibilityStatus {
        self.status = self.evaluator.evaluate(&self.profile, self.today);
        &self.status
    }
}
