//! Candidate profile storage, final submission and eligibility endpoints.

pub mod contract;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use contract::{contract_defaults, project_submission, ContractProjection};
pub use repository::{ProfileRepository, StoredProfile};
pub use router::profile_router;
pub use service::{
    CandidateProfileService, ProfileServiceError, ProfileSnapshot, SubmissionReceipt,
};
