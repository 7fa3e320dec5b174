use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Flat candidate record collected by the profile builder.
///
/// Every field is optional: a partially completed form is a valid profile. Empty strings are
/// treated the same as missing values, and boolean answers stay `None` until the candidate
/// answers them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub citizenship: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub current_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,

    pub category: Option<String>,
    #[serde(rename = "isPwD")]
    pub is_pwd: Option<bool>,
    pub disability_type: Option<String>,
    pub first_generation_graduate: Option<bool>,

    pub father_occupation: Option<String>,
    pub mother_occupation: Option<String>,
    pub family_income: Option<String>,
    pub govt_employee: Option<bool>,
    pub govt_employee_details: Option<String>,

    pub highest_degree: Option<String>,
    pub institution: Option<String>,
    pub field_of_study: Option<String>,
    pub specialization: Option<String>,
    pub cgpa: Option<String>,
    pub year_of_graduation: Option<String>,
    pub class12_board: Option<String>,
    pub class12_marks: Option<String>,
    pub class12_stream: Option<String>,
    pub class12_year: Option<String>,

    pub pm_internship_previous: Option<bool>,
    pub pm_skilling_previous: Option<bool>,
    pub nats_naps_training: Option<bool>,
    pub other_govt_scheme: Option<bool>,
    pub previous_scheme_details: Option<String>,

    pub last_company: Option<String>,
    pub last_position: Option<String>,
    pub work_start_date: Option<String>,
    pub work_end_date: Option<String>,
    pub currently_employed: Option<bool>,
    pub work_experience_months: Option<u32>,

    pub preferred_domain: Option<String>,
    pub preferred_location: Option<String>,
    pub internship_duration: Option<String>,
    pub expected_stipend: Option<String>,

    pub skills: BTreeSet<String>,

    pub aadhaar_url: Option<String>,
    pub education_certificates_url: Option<String>,
    pub category_certificate_url: Option<String>,
    pub income_certificate_url: Option<String>,
    pub resume_url: Option<String>,
    pub photo_url: Option<String>,
}

impl CandidateProfile {
    /// Adds a trimmed skill, ignoring blanks and duplicates. Returns whether the set changed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        self.skills.insert(skill.to_string())
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        self.skills.remove(skill.trim())
    }
}

/// Returns the trimmed value when the field carries something other than whitespace.
pub(crate) fn filled(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Annual family income bands offered by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeBracket {
    BelowOneLakh,
    OneToThreeLakh,
    ThreeToFiveLakh,
    FiveToEightLakh,
    EightToFifteenLakh,
    AboveFifteenLakh,
}

impl IncomeBracket {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "below-1-lakh" => Some(Self::BelowOneLakh),
            "1-3-lakh" => Some(Self::OneToThreeLakh),
            "3-5-lakh" => Some(Self::ThreeToFiveLakh),
            "5-8-lakh" => Some(Self::FiveToEightLakh),
            "8-15-lakh" => Some(Self::EightToFifteenLakh),
            "above-15-lakh" => Some(Self::AboveFifteenLakh),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::BelowOneLakh => "below-1-lakh",
            Self::OneToThreeLakh => "1-3-lakh",
            Self::ThreeToFiveLakh => "3-5-lakh",
            Self::FiveToEightLakh => "5-8-lakh",
            Self::EightToFifteenLakh => "8-15-lakh",
            Self::AboveFifteenLakh => "above-15-lakh",
        }
    }

    /// Bands at or under the ₹8,00,000 ceiling.
    pub const fn within_limit(self) -> bool {
        matches!(
            self,
            Self::BelowOneLakh | Self::OneToThreeLakh | Self::ThreeToFiveLakh | Self::FiveToEightLakh
        )
    }
}

/// Eligibility rules, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    Age,
    Citizenship,
    Education,
    Income,
    Employment,
    Family,
    PriorParticipation,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::Age,
        Criterion::Citizenship,
        Criterion::Education,
        Criterion::Income,
        Criterion::Employment,
        Criterion::Family,
        Criterion::PriorParticipation,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Criterion::Age => "age",
            Criterion::Citizenship => "citizenship",
            Criterion::Education => "education",
            Criterion::Income => "income",
            Criterion::Employment => "employment",
            Criterion::Family => "family",
            Criterion::PriorParticipation => "prior-participation",
        }
    }
}

/// Verdict assigned independently to each criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriterionVerdict {
    Eligible,
    NotEligible,
    Pending,
}

/// Aggregate of all criterion verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverallStatus {
    Eligible,
    NotEligible,
    Pending,
    Partial,
}

impl OverallStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OverallStatus::Eligible => "eligible",
            OverallStatus::NotEligible => "not-eligible",
            OverallStatus::Pending => "pending",
            OverallStatus::Partial => "partial",
        }
    }
}

/// Derived eligibility verdict for a profile. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityStatus {
    pub criteria: BTreeMap<Criterion, CriterionVerdict>,
    pub overall: OverallStatus,
    /// Blocking reasons, in criterion evaluation order.
    pub issues: Vec<String>,
    /// Non-blocking notices, in criterion evaluation order.
    pub warnings: Vec<String>,
}

impl EligibilityStatus {
    pub fn verdict(&self, criterion: Criterion) -> CriterionVerdict {
        self.criteria
            .get(&criterion)
            .copied()
            .unwrap_or(CriterionVerdict::Pending)
    }

    pub fn is_eligible(&self) -> bool {
        self.overall == OverallStatus::Eligible
    }

    pub fn summary(&self) -> String {
        match self.overall {
            OverallStatus::Eligible if self.warnings.is_empty() => "eligible".to_string(),
            OverallStatus::Eligible => format!("eligible with notes: {}", self.warnings.join("; ")),
            OverallStatus::NotEligible => format!("not eligible: {}", self.issues.join("; ")),
            OverallStatus::Pending => {
                let open: Vec<&str> = self
                    .criteria
                    .iter()
                    .filter(|(_, verdict)| **verdict == CriterionVerdict::Pending)
                    .map(|(criterion, _)| criterion.label())
                    .collect();
                format!("pending: awaiting {}", open.join(", "))
            }
            OverallStatus::Partial => "partially evaluated".to_string(),
        }
    }
}
