use serde_json::{json, Map, Value};

use crate::workflows::eligibility::CandidateProfile;

/// Timestamps are stamped server-side, so clients may send them without them being reported
/// as dropped.
const SERVER_MANAGED_KEYS: [&str; 2] = ["createdAt", "updatedAt"];

/// Result of shaping a raw submission into the stored profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractProjection {
    pub profile: CandidateProfile,
    pub dropped_keys: Vec<String>,
}

/// Free-text contract keys, stored as `""` when absent.
const TEXT_KEYS: [&str; 35] = [
    "fullName",
    "dateOfBirth",
    "gender",
    "email",
    "phone",
    "currentAddress",
    "city",
    "state",
    "pincode",
    "category",
    "disabilityType",
    "fatherOccupation",
    "motherOccupation",
    "familyIncome",
    "govtEmployeeDetails",
    "highestDegree",
    "institution",
    "fieldOfStudy",
    "specialization",
    "yearOfGraduation",
    "cgpa",
    "class12Marks",
    "class12Year",
    "lastCompany",
    "lastPosition",
    "preferredDomain",
    "preferredLocation",
    "internshipDuration",
    "expectedStipend",
    "aadhaarUrl",
    "educationCertificatesUrl",
    "categoryCertificateUrl",
    "incomeCertificateUrl",
    "resumeUrl",
    "photoUrl",
];

/// Yes/no contract keys, stored as `false` when absent.
const FLAG_KEYS: [&str; 8] = [
    "isPwD",
    "firstGenerationGraduate",
    "govtEmployee",
    "pmInternshipPrevious",
    "pmSkillingPrevious",
    "otherGovtScheme",
    "natsNapsTraining",
    "currentlyEmployed",
];

/// Keys the backend stores on final submission, with the value used when a key is absent.
///
/// Class-12 board and stream, prior scheme details and work dates are collected by the form
/// but are not part of this set.
pub fn contract_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    for key in TEXT_KEYS {
        defaults.insert(key.to_string(), Value::String(String::new()));
    }
    for key in FLAG_KEYS {
        defaults.insert(key.to_string(), Value::Bool(false));
    }
    defaults.insert("citizenship".to_string(), json!("indian"));
    defaults.insert("skills".to_string(), json!([]));
    defaults.insert("workExperienceMonths".to_string(), json!(0));
    defaults
}

/// Project a submitted JSON object onto the contract keys.
///
/// Contract keys take the submitted value unless it is `null`, missing keys fall back to
/// [`contract_defaults`], and everything else is dropped. Dropped keys that carried a value are
/// reported back in sorted order.
pub fn project_submission(body: Map<String, Value>) -> Result<ContractProjection, serde_json::Error> {
    let mut shaped = contract_defaults();
    let mut dropped_keys = Vec::new();

    for (key, value) in body {
        if shaped.contains_key(&key) {
            if !value.is_null() {
                shaped.insert(key, value);
            }
        } else if !value.is_null() && !SERVER_MANAGED_KEYS.contains(&key.as_str()) {
            dropped_keys.push(key);
        }
    }
    dropped_keys.sort();

    let profile = serde_json::from_value(Value::Object(shaped))?;
    Ok(ContractProjection {
        profile,
        dropped_keys,
    })
}
