pub mod events;
pub mod health;

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::analysis::handlers as analysis;
use crate::analysis::handlers::WEAK_SKILL_LIMIT;
use crate::analysis::scoring::weak_skills;
use crate::errors::AppError;
use crate::progress::handlers as progress;
use crate::progress::ship_gate::{project_status, ProjectStatus};
use crate::state::AppState;
use crate::storage::history::load_history;
use crate::storage::StoreError;

const ROUTES: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("GET", "/api/v1/dashboard"),
    ("POST", "/api/v1/analyses"),
    ("GET", "/api/v1/analyses"),
    ("GET", "/api/v1/results?id="),
    ("GET", "/api/v1/analyses/:id"),
    ("PUT", "/api/v1/analyses/:id/skills/:skill"),
    ("GET", "/api/v1/analyses/:id/export?section="),
    ("GET", "/api/v1/steps"),
    ("PUT", "/api/v1/steps"),
    ("GET", "/api/v1/test-checklist"),
    ("PUT", "/api/v1/test-checklist"),
    ("POST", "/api/v1/test-checklist/reset"),
    ("GET", "/api/v1/ship"),
    ("GET", "/api/v1/proof"),
    ("PUT", "/api/v1/proof"),
    ("GET", "/api/v1/events/next?timeout_ms="),
];

/// GET /
async fn landing_handler() -> Json<Value> {
    let routes: Vec<Value> = ROUTES
        .iter()
        .map(|(method, path)| json!({ "method": method, "path": path }))
        .collect();
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "tagline": "Paste a job description, get a readiness score, a round map and a 7-day plan.",
        "routes": routes
    }))
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub latest_score: Option<u32>,
    pub latest_id: Option<String>,
    pub history_count: usize,
    pub weak_skills: Vec<String>,
    pub history_warning: Option<String>,
    pub project_status: ProjectStatus,
}

/// GET /api/v1/dashboard
async fn dashboard_handler(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let (load, status) = state
        .with_storage(|storage| Ok::<_, StoreError>((load_history(storage)?, project_status(storage)?)))
        .await?;
    let latest = load.entries.first();
    Ok(Json(DashboardResponse {
        latest_score: latest.map(|e| e.final_score),
        latest_id: latest.map(|e| e.id.clone()),
        history_count: load.entries.len(),
        weak_skills: latest
            .map(|e| weak_skills(&e.extracted_skills, &e.skill_confidence_map, WEAK_SKILL_LIMIT))
            .unwrap_or_default(),
        history_warning: load.warning.clone(),
        project_status: status,
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/dashboard", get(dashboard_handler))
        // Analysis + history
        .route(
            "/api/v1/analyses",
            post(analysis::handle_analyze).get(analysis::handle_list_history),
        )
        .route("/api/v1/results", get(analysis::handle_results))
        .route("/api/v1/analyses/:id", get(analysis::handle_get_analysis))
        .route(
            "/api/v1/analyses/:id/skills/:skill",
            put(analysis::handle_set_confidence),
        )
        .route("/api/v1/analyses/:id/export", get(analysis::handle_export))
        // Project progress
        .route(
            "/api/v1/steps",
            get(progress::handle_get_steps).put(progress::handle_put_steps),
        )
        .route(
            "/api/v1/test-checklist",
            get(progress::handle_get_test_checklist).put(progress::handle_put_test_checklist),
        )
        .route(
            "/api/v1/test-checklist/reset",
            post(progress::handle_reset_test_checklist),
        )
        .route("/api/v1/ship", get(progress::handle_ship_status))
        .route(
            "/api/v1/proof",
            get(progress::handle_get_proof).put(progress::handle_put_proof),
        )
        // Change notification
        .route("/api/v1/events/next", get(events::handle_next_event))
        .with_state(state)
}
