use serde::Serialize;

use super::steps::{load_steps, PROJECT_STEPS};
use super::submission::{load_submission, validate_submission_links, Submission};
use super::test_checklist::{load_test_checklist, summarize};
use super::{count_done, FlagState};
use crate::storage::{Storage, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectStatus {
    pub completed_steps: usize,
    pub total_steps: usize,
    pub checklist_passed: usize,
    pub checklist_total: usize,
    pub steps_complete: bool,
    pub checklist_complete: bool,
    pub proof_links_complete: bool,
    pub is_shipped: bool,
}

/// Shipped only when every step is done, every test passes and all three links are valid.
pub fn compute_status(steps: &FlagState, checklist: &FlagState, submission: &Submission) -> ProjectStatus {
    let completed_steps = count_done(steps);
    let summary = summarize(checklist);
    let steps_complete = completed_steps == PROJECT_STEPS.len();
    let proof_links_complete = validate_submission_links(submission).is_empty();

    ProjectStatus {
        completed_steps,
        total_steps: PROJECT_STEPS.len(),
        checklist_passed: summary.passed,
        checklist_total: summary.total,
        steps_complete,
        checklist_complete: summary.is_complete,
        proof_links_complete,
        is_shipped: steps_complete && summary.is_complete && proof_links_complete,
    }
}

pub fn project_status(storage: &Storage) -> Result<ProjectStatus, StoreError> {
    Ok(compute_status(
        &load_steps(storage)?,
        &load_test_checklist(storage)?,
        &load_submission(storage)?,
    ))
}
