use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{CandidateProfile, EligibilityStatus, OverallStatus};
use super::EligibilityEvaluator;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read candidate roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid candidate roster CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Eligibility outcome for one roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterScreening {
    pub row: usize,
    pub name: String,
    pub status: EligibilityStatus,
}

/// Screening results for a whole roster with a per-status tally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterReport {
    pub screenings: Vec<RosterScreening>,
    pub eligible: usize,
    pub not_eligible: usize,
    pub pending: usize,
    pub partial: usize,
}

impl RosterReport {
    fn record(&mut self, screening: RosterScreening) {
        match screening.status.overall {
            OverallStatus::Eligible => self.eligible += 1,
            OverallStatus::NotEligible => self.not_eligible += 1,
            OverallStatus::Pending => self.pending += 1,
            OverallStatus::Partial => self.partial += 1,
        }
        self.screenings.push(screening);
    }
}

pub fn screen_roster_file(
    path: impl AsRef<Path>,
    evaluator: &EligibilityEvaluator,
    today: NaiveDate,
) -> Result<RosterReport, RosterError> {
    let file = File::open(path)?;
    screen_roster(file, evaluator, today)
}

/// Evaluate each CSV row. Columns use the profile's camelCase field names; blank cells are
/// treated as unanswered.
pub fn screen_roster<R: Read>(
    reader: R,
    evaluator: &EligibilityEvaluator,
    today: NaiveDate,
) -> Result<RosterReport, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut report = RosterReport::default();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record?;
        let number = index + 1;
        let name = row
            .full_name
            .clone()
            .unwrap_or_else(|| format!("candidate #{number}"));
        let profile = row.into_profile();
        let status = evaluator.evaluate(&profile, today);

        report.record(RosterScreening {
            row: number,
            name,
            status,
        });
    }

    Ok(report)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RosterRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    full_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    citizenship: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    highest_degree: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    institution: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    family_income: Option<String>,
    #[serde(default, deserialize_with = "answer")]
    currently_employed: Option<bool>,
    #[serde(default, deserialize_with = "answer")]
    govt_employee: Option<bool>,
    #[serde(default, deserialize_with = "answer")]
    pm_internship_previous: Option<bool>,
    #[serde(default, deserialize_with = "answer")]
    pm_skilling_previous: Option<bool>,
    #[serde(default, deserialize_with = "answer")]
    nats_naps_training: Option<bool>,
    #[serde(default, deserialize_with = "answer")]
    other_govt_scheme: Option<bool>,
}

impl RosterRow {
    fn into_profile(self) -> CandidateProfile {
        CandidateProfile {
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            citizenship: self.citizenship,
            highest_degree: self.highest_degree,
            institution: self.institution,
            family_income: self.family_income,
            currently_employed: self.currently_employed,
            govt_employee: self.govt_employee,
            pm_internship_previous: self.pm_internship_previous,
            pm_skilling_previous: self.pm_skilling_previous,
            nats_naps_training: self.nats_naps_training,
            other_govt_scheme: self.other_govt_scheme,
            ..CandidateProfile::default()
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Yes/no cell; anything unrecognised counts as unanswered.
fn answer<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(
        |value| match value.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
    ))
}
