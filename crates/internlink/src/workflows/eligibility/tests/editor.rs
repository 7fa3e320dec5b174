use super::common::*;
use crate::workflows::eligibility::{Criterion, CriterionVerdict, OverallStatus, ProfileEditor};

#[test]
fn new_editor_starts_pending_and_blocks_submission() {
    let editor = ProfileEditor::new(evaluator(), today());
    assert_eq!(editor.status().overall, OverallStatus::Pending);
    assert!(!editor.can_submit());
}

#[test]
fn every_edit_recomputes_the_status() {
    let mut editor = ProfileEditor::new(evaluator(), today());

    let status = editor.update(|profile| profile.citizenship = text("indian"));
    assert_eq!(status.verdict(Criterion::Citizenship), CriterionVerdict::Eligible);

    editor.replace(eligible_profile());
    assert!(editor.can_submit());

    let status = editor.update(|profile| profile.family_income = text("8-15-lakh"));
    assert_eq!(status.overall, OverallStatus::NotEligible);
    assert!(!editor.can_submit());

    editor.update(|profile| profile.family_income = text("1-3-lakh"));
    assert!(editor.can_submit());
}

#[test]
fn skills_are_a_trimmed_set() {
    let mut editor = ProfileEditor::from_profile(evaluator(), eligible_profile(), today());

    assert!(editor.add_skill(" Rust "));
    assert!(!editor.add_skill("Rust"));
    assert!(!editor.add_skill("   "));
    assert!(editor.add_skill("Python"));
    assert_eq!(
        editor.profile().skills.iter().collect::<Vec<_>>(),
        vec!["Python", "Rust"]
    );

    assert!(editor.remove_skill("Rust"));
    assert!(!editor.remove_skill("Go"));
    assert!(editor.can_submit());

    let profile = editor.into_profile();
    assert_eq!(profile.skills.len(), 1);
}
