use serde::Serialize;
use serde_json::Value;

use super::{count_done, normalize_flags, FlagState};
use crate::storage::{Storage, StoreError, StoreEvent};

pub const TEST_CHECKLIST_KEY: &str = "prp_test_checklist_v1";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TestItem {
    pub id: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

pub const TEST_ITEMS: [TestItem; 10] = [
    TestItem {
        id: "jd_required",
        label: "JD required validation works",
        hint: "Try submitting the analysis form with an empty JD.",
    },
    TestItem {
        id: "short_jd_warning",
        label: "Short JD warning shows for <200 chars",
        hint: "Paste a short JD and verify the advisory appears.",
    },
    TestItem {
        id: "skills_grouping",
        label: "Skills extraction groups correctly",
        hint: "Check grouped skills in Results under all categories.",
    },
    TestItem {
        id: "round_mapping_dynamic",
        label: "Round mapping changes based on company + skills",
        hint: "Compare Amazon + DSA vs unknown startup + React/Node.",
    },
    TestItem {
        id: "score_deterministic",
        label: "Score calculation is deterministic",
        hint: "Run same analysis twice and compare base score.",
    },
    TestItem {
        id: "toggle_live_score",
        label: "Skill toggles update score live",
        hint: "Toggle a skill and observe the score change.",
    },
    TestItem {
        id: "persist_after_refresh",
        label: "Changes persist after refresh",
        hint: "Reload Results and confirm toggles and score stay.",
    },
    TestItem {
        id: "history_save_load",
        label: "History saves and loads correctly",
        hint: "Open History and load a saved entry into Results.",
    },
    TestItem {
        id: "export_content",
        label: "Export returns the correct content",
        hint: "Export each section and verify the text.",
    },
    TestItem {
        id: "no_console_errors",
        label: "No errors on core pages",
        hint: "Visit Home, Practice, Results, History and inspect the logs.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistSummary {
    pub passed: usize,
    pub total: usize,
    pub is_complete: bool,
}

pub fn normalize_test_checklist(raw: Option<&Value>) -> FlagState {
    normalize_flags(TEST_ITEMS.iter().map(|item| item.id), raw)
}

pub fn summarize(state: &FlagState) -> ChecklistSummary {
    let passed = count_done(state);
    ChecklistSummary {
        passed,
        total: TEST_ITEMS.len(),
        is_complete: passed == TEST_ITEMS.len(),
    }
}

pub fn load_test_checklist(storage: &Storage) -> Result<FlagState, StoreError> {
    Ok(normalize_test_checklist(
        storage.read_json(TEST_CHECKLIST_KEY)?.as_ref(),
    ))
}

pub fn save_test_checklist(storage: &Storage, raw: &Value) -> Result<FlagState, StoreError> {
    let state = normalize_test_checklist(Some(raw));
    let _guard = storage.lock();
    storage.write_json(TEST_CHECKLIST_KEY, &state, StoreEvent::TestChecklistChanged)?;
    Ok(state)
}

pub fn reset_test_checklist(storage: &Storage) -> Result<FlagState, StoreError> {
    save_test_checklist(storage, &Value::Null)
}
