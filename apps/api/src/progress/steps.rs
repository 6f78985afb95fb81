use serde::Serialize;
use serde_json::Value;

use super::{normalize_flags, FlagState};
use crate::storage::{Storage, StoreError, StoreEvent};

pub const STEP_KEY: &str = "prp_step_completion_v1";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectStep {
    pub id: &'static str,
    pub title: &'static str,
}

pub const PROJECT_STEPS: [ProjectStep; 8] = [
    ProjectStep { id: "step_01", title: "Foundation + UI Shell" },
    ProjectStep { id: "step_02", title: "Landing + Dashboard Experience" },
    ProjectStep { id: "step_03", title: "Analysis Engine" },
    ProjectStep { id: "step_04", title: "Interactive Results" },
    ProjectStep { id: "step_05", title: "Company Intel + Round Mapping" },
    ProjectStep { id: "step_06", title: "History + Export Tools" },
    ProjectStep { id: "step_07", title: "Test Checklist" },
    ProjectStep { id: "step_08", title: "Proof + Final Submission" },
];

pub fn normalize_steps(raw: Option<&Value>) -> FlagState {
    normalize_flags(PROJECT_STEPS.iter().map(|s| s.id), raw)
}

pub fn load_steps(storage: &Storage) -> Result<FlagState, StoreError> {
    Ok(normalize_steps(storage.read_json(STEP_KEY)?.as_ref()))
}

pub fn save_steps(storage: &Storage, raw: &Value) -> Result<FlagState, StoreError> {
    let state = normalize_steps(Some(raw));
    let _guard = storage.lock();
    storage.write_json(STEP_KEY, &state, StoreEvent::StepsChanged)?;
    Ok(state)
}
