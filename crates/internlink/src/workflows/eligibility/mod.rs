//! PM Internship Scheme eligibility.
//!
//! The evaluator is a pure function of a [`CandidateProfile`] and an evaluation date. It never
//! fails: missing answers leave a criterion `pending`, and unrecognised values fall through to
//! the rule's explicit `not-eligible` branch.

pub mod domain;
pub mod editor;
pub(crate) mod policy;
pub mod roster;
pub(crate) mod rules;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateProfile, Criterion, CriterionVerdict, EligibilityStatus, IncomeBracket,
    OverallStatus,
};
pub use editor::ProfileEditor;
pub use policy::EligibilityPolicy;
pub use roster::{screen_roster, screen_roster_file, RosterError, RosterReport, RosterScreening};

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

/// Stateless evaluator applying the scheme rules to a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EligibilityEvaluator {
    policy: EligibilityPolicy,
}

impl EligibilityEvaluator {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Evaluate every criterion as of `today`.
    pub fn evaluate(&self, profile: &CandidateProfile, today: NaiveDate) -> EligibilityStatus {
        let mut criteria = BTreeMap::new();
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        for (criterion, outcome) in rules::evaluate_criteria(profile, &self.policy, today) {
            criteria.insert(criterion, outcome.verdict);
            issues.extend(outcome.issues);
            warnings.extend(outcome.warnings);
        }

        let overall = policy::roll_up(&criteria);

        EligibilityStatus {
            criteria,
            overall,
            issues,
            warnings,
        }
    }

    /// Evaluate against the local calendar date.
    pub fn evaluate_today(&self, profile: &CandidateProfile) -> EligibilityStatus {
        self.evaluate(profile, Local::now().date_naive())
    }
}
