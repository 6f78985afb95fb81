use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::progress::ship_gate::{project_status, ProjectStatus};
use crate::progress::steps::{load_steps, save_steps, ProjectStep, PROJECT_STEPS};
use crate::progress::submission::{
    load_submission, save_submission, validate_submission_links, LinkErrors, Submission,
    SubmissionInput,
};
use crate::progress::test_checklist::{
    load_test_checklist, reset_test_checklist, save_test_checklist, summarize, ChecklistSummary,
    TestItem, TEST_ITEMS,
};
use crate::progress::FlagState;
use crate::state::AppState;
use crate::storage::StoreError;

#[derive(Serialize)]
pub struct StepsResponse {
    pub steps: &'static [ProjectStep],
    pub state: FlagState,
    pub status: ProjectStatus,
}

#[derive(Serialize)]
pub struct TestChecklistResponse {
    pub items: &'static [TestItem],
    pub state: FlagState,
    pub summary: ChecklistSummary,
}

#[derive(Serialize)]
pub struct ProofResponse {
    pub submission: Submission,
    pub errors: LinkErrors,
    pub status: ProjectStatus,
}

fn steps_response(steps: FlagState, status: ProjectStatus) -> Json<StepsResponse> {
    Json(StepsResponse {
        steps: &PROJECT_STEPS,
        state: steps,
        status,
    })
}

fn checklist_response(checklist: FlagState) -> Json<TestChecklistResponse> {
    let summary = summarize(&checklist);
    Json(TestChecklistResponse {
        items: &TEST_ITEMS,
        state: checklist,
        summary,
    })
}

fn proof_response(submission: Submission, status: ProjectStatus) -> Json<ProofResponse> {
    let errors = validate_submission_links(&submission);
    Json(ProofResponse {
        submission,
        errors,
        status,
    })
}

/// GET /api/v1/steps
pub async fn handle_get_steps(State(state): State<AppState>) -> Result<Json<StepsResponse>, AppError> {
    let (steps, status) = state
        .with_storage(|storage| Ok::<_, StoreError>((load_steps(storage)?, project_status(storage)?)))
        .await?;
    Ok(steps_response(steps, status))
}

/// PUT /api/v1/steps
pub async fn handle_put_steps(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<StepsResponse>, AppError> {
    let (steps, status) = state
        .with_storage(move |storage| {
            Ok::<_, StoreError>((save_steps(storage, &body)?, project_status(storage)?))
        })
        .await?;
    Ok(steps_response(steps, status))
}

/// GET /api/v1/test-checklist
pub async fn handle_get_test_checklist(
    State(state): State<AppState>,
) -> Result<Json<TestChecklistResponse>, AppError> {
    Ok(checklist_response(state.with_storage(load_test_checklist).await?))
}

/// PUT /api/v1/test-checklist
pub async fn handle_put_test_checklist(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<TestChecklistResponse>, AppError> {
    let checklist = state
        .with_storage(move |storage| save_test_checklist(storage, &body))
        .await?;
    Ok(checklist_response(checklist))
}

/// POST /api/v1/test-checklist/reset
pub async fn handle_reset_test_checklist(
    State(state): State<AppState>,
) -> Result<Json<TestChecklistResponse>, AppError> {
    Ok(checklist_response(state.with_storage(reset_test_checklist).await?))
}

/// GET /api/v1/ship
pub async fn handle_ship_status(State(state): State<AppState>) -> Result<Json<ProjectStatus>, AppError> {
    Ok(Json(state.with_storage(project_status).await?))
}

/// GET /api/v1/proof
pub async fn handle_get_proof(State(state): State<AppState>) -> Result<Json<ProofResponse>, AppError> {
    let (submission, status) = state
        .with_storage(|storage| {
            Ok::<_, StoreError>((load_submission(storage)?, project_status(storage)?))
        })
        .await?;
    Ok(proof_response(submission, status))
}

/// PUT /api/v1/proof
pub async fn handle_put_proof(
    State(state): State<AppState>,
    Json(input): Json<SubmissionInput>,
) -> Result<Json<ProofResponse>, AppError> {
    let (submission, status) = state
        .with_storage(move |storage| {
            Ok::<_, StoreError>((save_submission(storage, input)?, project_status(storage)?))
        })
        .await?;
    Ok(proof_response(submission, status))
}
