use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Criterion, CriterionVerdict, OverallStatus};

/// Tunable thresholds for the scheme rules. The age window is inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    pub min_age: u32,
    pub max_age: u32,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            min_age: 21,
            max_age: 24,
        }
    }
}

/// Combine per-criterion verdicts: any `not-eligible` dominates, then any `pending`.
/// `eligible` requires every criterion to be present and eligible; anything else is `partial`.
pub(crate) fn roll_up(criteria: &BTreeMap<Criterion, CriterionVerdict>) -> OverallStatus {
    let mut any_pending = false;
    for verdict in criteria.values() {
        match verdict {
            CriterionVerdict::NotEligible => return OverallStatus::NotEligible,
            CriterionVerdict::Pending => any_pending = true,
            CriterionVerdict::Eligible => {}
        }
    }

    if any_pending {
        return OverallStatus::Pending;
    }

    let complete = Criterion::ALL
        .iter()
        .all(|criterion| criteria.get(criterion) == Some(&CriterionVerdict::Eligible));
    if complete {
        OverallStatus::Eligible
    } else {
        OverallStatus::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(verdict: CriterionVerdict) -> BTreeMap<Criterion, CriterionVerdict> {
        Criterion::ALL
            .iter()
            .map(|criterion| (*criterion, verdict))
            .collect()
    }

    #[test]
    fn not_eligible_dominates_pending() {
        let mut criteria = all(CriterionVerdict::Pending);
        criteria.insert(Criterion::Family, CriterionVerdict::NotEligible);
        assert_eq!(roll_up(&criteria), OverallStatus::NotEligible);
    }

    #[test]
    fn single_pending_keeps_overall_pending() {
        let mut criteria = all(CriterionVerdict::Eligible);
        criteria.insert(Criterion::Income, CriterionVerdict::Pending);
        assert_eq!(roll_up(&criteria), OverallStatus::Pending);
    }

    #[test]
    fn all_eligible_rolls_up_to_eligible() {
        assert_eq!(
            roll_up(&all(CriterionVerdict::Eligible)),
            OverallStatus::Eligible
        );
    }

    #[test]
    fn incomplete_criteria_fall_back_to_partial() {
        let mut criteria = all(CriterionVerdict::Eligible);
        criteria.remove(&Criterion::Age);
        assert_eq!(roll_up(&criteria), OverallStatus::Partial);
        assert_eq!(roll_up(&BTreeMap::new()), OverallStatus::Partial);
    }
}
