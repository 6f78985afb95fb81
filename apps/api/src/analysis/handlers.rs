use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::engine::{run_analysis, validate_input, AnalysisInput};
use crate::analysis::export::{export_filename, render_export, ExportSection};
use crate::analysis::scoring::{weak_skills, SkillConfidence};
use crate::errors::AppError;
use crate::models::history::HistoryEntry;
use crate::state::AppState;
use crate::storage::history::{
    find_entry, load_history, refresh_on_view, resolve_entry, save_entry, set_skill_confidence,
};

pub const WEAK_SKILL_LIMIT: usize = 3;
const ACTION_NEXT_MESSAGE: &str = "Start Day 1 plan now.";

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub entry: HistoryEntry,
    /// Present when the JD is short enough to limit the analysis.
    pub advisory: Option<&'static str>,
}

#[derive(Serialize)]
pub struct HistorySummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub company: String,
    pub role: String,
    pub final_score: u32,
}

#[derive(Serialize)]
pub struct HistoryListResponse {
    pub entries: Vec<HistorySummary>,
    pub warning: Option<String>,
}

#[derive(Serialize)]
pub struct ActionNext {
    pub weak_skills: Vec<String>,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ResultsResponse {
    pub entry: HistoryEntry,
    pub action_next: ActionNext,
}

#[derive(Deserialize)]
pub struct ResultsQuery {
    pub id: Option<String>,
}

#[derive(Deserialize)]
pub struct ConfidenceUpdate {
    pub confidence: SkillConfidence,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub section: ExportSection,
}

fn results_response(entry: HistoryEntry) -> ResultsResponse {
    let weak = weak_skills(
        &entry.extracted_skills,
        &entry.skill_confidence_map,
        WEAK_SKILL_LIMIT,
    );
    ResultsResponse {
        entry,
        action_next: ActionNext {
            weak_skills: weak,
            message: ACTION_NEXT_MESSAGE,
        },
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("No analysis with id '{id}'"))
}

/// POST /api/v1/analyses
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(input): Json<AnalysisInput>,
) -> Result<(StatusCode, Json<AnalyzeResponse>), AppError> {
    let advisory = validate_input(&input.jd_text)?;
    let weights = &state.config.score_weights;

    let result = run_analysis(&input, weights);
    let entry = HistoryEntry::from_analysis(Uuid::new_v4().to_string(), Utc::now(), result, weights);
    let entry = state
        .with_storage(move |storage| save_entry(storage, entry))
        .await?;

    info!(
        id = %entry.id,
        base_score = entry.base_score,
        final_score = entry.final_score,
        "Analysis saved"
    );
    Ok((StatusCode::CREATED, Json(AnalyzeResponse { entry, advisory })))
}

/// GET /api/v1/analyses
pub async fn handle_list_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryListResponse>, AppError> {
    let load = state.with_storage(load_history).await?;
    let entries = load
        .entries
        .into_iter()
        .map(|entry| HistorySummary {
            id: entry.id,
            created_at: entry.created_at,
            company: entry.company,
            role: entry.role,
            final_score: entry.final_score,
        })
        .collect();
    Ok(Json(HistoryListResponse {
        entries,
        warning: load.warning,
    }))
}

/// GET /api/v1/results?id=
pub async fn handle_results(
    State(state): State<AppState>,
    Query(params): Query<ResultsQuery>,
) -> Result<Json<ResultsResponse>, AppError> {
    let weights = state.config.score_weights.clone();
    let entry = state
        .with_storage(move |storage| {
            let entry = resolve_entry(storage, params.id.as_deref())?.ok_or_else(|| {
                AppError::NotFound("No analysis yet. Run one from the practice page.".to_string())
            })?;
            Ok::<_, AppError>(refresh_on_view(storage, entry, &weights)?)
        })
        .await?;
    Ok(Json(results_response(entry)))
}

/// Looks up `id` and applies the view-time refresh.
async fn view_entry(state: &AppState, id: String) -> Result<HistoryEntry, AppError> {
    let weights = state.config.score_weights.clone();
    state
        .with_storage(move |storage| {
            let entry = find_entry(storage, &id)?.ok_or_else(|| not_found(&id))?;
            Ok::<_, AppError>(refresh_on_view(storage, entry, &weights)?)
        })
        .await
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResultsResponse>, AppError> {
    let entry = view_entry(&state, id).await?;
    Ok(Json(results_response(entry)))
}

/// PUT /api/v1/analyses/:id/skills/:skill
pub async fn handle_set_confidence(
    State(state): State<AppState>,
    Path((id, skill)): Path<(String, String)>,
    Json(req): Json<ConfidenceUpdate>,
) -> Result<Json<ResultsResponse>, AppError> {
    let weights = state.config.score_weights.clone();
    let entry = state
        .with_storage(move |storage| {
            set_skill_confidence(storage, &id, &skill, req.confidence, &weights)
        })
        .await?;
    Ok(Json(results_response(entry)))
}

/// GET /api/v1/analyses/:id/export?section=
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entry = view_entry(&state, id).await?;
    let body = render_export(&entry, params.section);
    let disposition = format!("attachment; filename=\"{}\"", export_filename(&entry));
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
