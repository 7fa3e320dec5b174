use chrono::{Datelike, NaiveDate};

use super::domain::{filled, CandidateProfile, Criterion, CriterionVerdict, IncomeBracket};
use super::policy::EligibilityPolicy;

/// Institution name fragments excluded from the scheme, matched case-insensitively.
const EXCLUDED_INSTITUTIONS: [&str; 6] = [
    "iit",
    "iim",
    "national law university",
    "iiser",
    "nid",
    "iiit",
];

const ACCEPTED_DEGREES: [&str; 10] = [
    "class12", "btech", "iti", "diploma", "ba", "bsc", "bcom", "bca", "bba", "bpharma",
];

const POSTGRADUATE_DEGREES: [&str; 8] = ["phd", "mtech", "msc", "mca", "mba", "ma", "mcom", "llm"];

const PROFESSIONAL_QUALIFICATIONS: [&str; 5] = ["ca", "cma", "cs", "mbbs", "bds"];

pub(crate) const INSTITUTION_NOT_ELIGIBLE: &str =
    "Institution not eligible: graduates of IITs, IIMs, National Law Universities, IISERs, NIDs and IIITs cannot apply";
pub(crate) const PROFESSIONAL_QUALIFICATION: &str =
    "Professional qualification holders (CA, CMA, CS, MBBS, BDS) are not eligible";
pub(crate) const POSTGRADUATE_DEGREE: &str = "Postgraduate degree holders are not eligible";
pub(crate) const UNRECOGNISED_DEGREE: &str =
    "Highest qualification does not meet the scheme's education requirement";
pub(crate) const CLASS12_CONSIDERATION: &str =
    "Education consideration: Class 12 candidates are matched to a narrower set of internships";
pub(crate) const CITIZENSHIP_REQUIRED: &str =
    "Citizenship requirement not met: only Indian citizens can apply";
pub(crate) const INCOME_LIMIT_EXCEEDED: &str =
    "Income limit exceeded: annual family income must not exceed ₹8,00,000";
pub(crate) const CURRENTLY_EMPLOYED: &str =
    "Candidates in full-time employment are not eligible";
pub(crate) const GOVERNMENT_EMPLOYEE_IN_FAMILY: &str =
    "No family member may be a permanent/regular government employee";
pub(crate) const PREVIOUS_PM_INTERNSHIP: &str =
    "Already completed an internship under the PM Internship Scheme";
pub(crate) const PREVIOUS_PM_SKILLING: &str =
    "Already trained under a PM skilling scheme";
pub(crate) const PREVIOUS_NATS_NAPS: &str =
    "Already completed apprenticeship training under NATS/NAPS";
pub(crate) const OTHER_SCHEME_PRIORITY: &str =
    "Participation in other government schemes may affect selection priority";

/// Result of a single rule: its verdict plus the messages it contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CriterionOutcome {
    pub verdict: CriterionVerdict,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl CriterionOutcome {
    fn pending() -> Self {
        Self {
            verdict: CriterionVerdict::Pending,
            issues: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn eligible() -> Self {
        Self {
            verdict: CriterionVerdict::Eligible,
            issues: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn not_eligible(issue: impl Into<String>) -> Self {
        Self {
            verdict: CriterionVerdict::NotEligible,
            issues: vec![issue.into()],
            warnings: Vec::new(),
        }
    }

    fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

pub(crate) fn evaluate_criteria(
    profile: &CandidateProfile,
    policy: &EligibilityPolicy,
    today: NaiveDate,
) -> Vec<(Criterion, CriterionOutcome)> {
    Criterion::ALL
        .iter()
        .map(|criterion| {
            let outcome = match criterion {
                Criterion::Age => age(profile, policy, today),
                Criterion::Citizenship => citizenship(profile),
                Criterion::Education => education(profile),
                Criterion::Income => income(profile),
                Criterion::Employment => employment(profile),
                Criterion::Family => family(profile),
                Criterion::PriorParticipation => prior_participation(profile),
            };
            (*criterion, outcome)
        })
        .collect()
}

pub(crate) fn age(
    profile: &CandidateProfile,
    policy: &EligibilityPolicy,
    today: NaiveDate,
) -> CriterionOutcome {
    let Some(years) = filled(&profile.date_of_birth)
        .and_then(parse_birth_date)
        .and_then(|born| age_on(born, today))
    else {
        return CriterionOutcome::pending();
    };

    if years < policy.min_age {
        CriterionOutcome::not_eligible(format!(
            "Age requirement not met: candidates must be at least {} years old (currently {years})",
            policy.min_age
        ))
    } else if years > policy.max_age {
        CriterionOutcome::not_eligible(format!(
            "Age limit exceeded: candidates must be at most {} years old (currently {years})",
            policy.max_age
        ))
    } else {
        CriterionOutcome::eligible()
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let date_part = match raw.split_once('T') {
        Some((date, _)) => date,
        None => raw,
    };
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d").ok()
}

/// Completed years between `born` and `today`; `None` for birth dates in the future.
pub(crate) fn age_on(born: NaiveDate, today: NaiveDate) -> Option<u32> {
    if born > today {
        return None;
    }
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

pub(crate) fn citizenship(profile: &CandidateProfile) -> CriterionOutcome {
    match filled(&profile.citizenship) {
        None => CriterionOutcome::pending(),
        Some(value) if value.eq_ignore_ascii_case("indian") => CriterionOutcome::eligible(),
        Some(_) => CriterionOutcome::not_eligible(CITIZENSHIP_REQUIRED),
    }
}

pub(crate) fn education(profile: &CandidateProfile) -> CriterionOutcome {
    let (Some(degree), Some(institution)) = (
        filled(&profile.highest_degree),
        filled(&profile.institution),
    ) else {
        return CriterionOutcome::pending();
    };

    let institution = institution.to_lowercase();
    if EXCLUDED_INSTITUTIONS
        .iter()
        .any(|fragment| institution.contains(fragment))
    {
        return CriterionOutcome::not_eligible(INSTITUTION_NOT_ELIGIBLE);
    }

    let degree = degree.to_ascii_lowercase();
    let degree = degree.as_str();
    if PROFESSIONAL_QUALIFICATIONS.contains(&degree) {
        return CriterionOutcome::not_eligible(PROFESSIONAL_QUALIFICATION);
    }
    if POSTGRADUATE_DEGREES.contains(&degree) {
        return CriterionOutcome::not_eligible(POSTGRADUATE_DEGREE);
    }
    if ACCEPTED_DEGREES.contains(&degree) {
        let outcome = CriterionOutcome::eligible();
        return if degree == "class12" {
            outcome.with_warning(CLASS12_CONSIDERATION)
        } else {
            outcome
        };
    }

    CriterionOutcome::not_eligible(UNRECOGNISED_DEGREE)
}

pub(crate) fn income(profile: &CandidateProfile) -> CriterionOutcome {
    match filled(&profile.family_income) {
        None => CriterionOutcome::pending(),
        Some(code) => match IncomeBracket::from_code(code) {
            Some(bracket) if bracket.within_limit() => CriterionOutcome::eligible(),
            _ => CriterionOutcome::not_eligible(INCOME_LIMIT_EXCEEDED),
        },
    }
}

pub(crate) fn employment(profile: &CandidateProfile) -> CriterionOutcome {
    match profile.currently_employed {
        None => CriterionOutcome::pending(),
        Some(false) => CriterionOutcome::eligible(),
        Some(true) => CriterionOutcome::not_eligible(CURRENTLY_EMPLOYED),
    }
}

pub(crate) fn family(profile: &CandidateProfile) -> CriterionOutcome {
    match profile.govt_employee {
        None => CriterionOutcome::pending(),
        Some(false) => CriterionOutcome::eligible(),
        Some(true) => CriterionOutcome::not_eligible(GOVERNMENT_EMPLOYEE_IN_FAMILY),
    }
}

pub(crate) fn prior_participation(profile: &CandidateProfile) -> CriterionOutcome {
    let flags = [
        profile.pm_internship_previous,
        profile.pm_skilling_previous,
        profile.nats_naps_training,
        profile.other_govt_scheme,
    ];
    if flags.iter().all(Option::is_none) {
        return CriterionOutcome::pending();
    }

    let disqualifying = [
        (profile.pm_internship_previous, PREVIOUS_PM_INTERNSHIP),
        (profile.pm_skilling_previous, PREVIOUS_PM_SKILLING),
        (profile.nats_naps_training, PREVIOUS_NATS_NAPS),
    ];
    let issues: Vec<String> = disqualifying
        .iter()
        .filter(|(flag, _)| *flag == Some(true))
        .map(|(_, message)| message.to_string())
        .collect();

    if !issues.is_empty() {
        return CriterionOutcome {
            verdict: CriterionVerdict::NotEligible,
            issues,
            warnings: Vec::new(),
        };
    }

    if profile.other_govt_scheme == Some(true) {
        CriterionOutcome::eligible().with_warning(OTHER_SCHEME_PRIORITY)
    } else {
        CriterionOutcome::eligible()
    }
}
