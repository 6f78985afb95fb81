//! Analysis history: a most-recent-first JSON array under one key.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{Storage, StoreError, StoreEvent};
use crate::analysis::scoring::{ScoreWeights, SkillConfidence};
use crate::errors::AppError;
use crate::models::history::HistoryEntry;

pub const HISTORY_KEY: &str = "prp_analysis_history_v1";
pub const LOAD_WARNING: &str = "One saved entry couldn't be loaded. Create a new analysis.";

/// Entries that survived validation, plus a warning when anything was dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryLoad {
    pub entries: Vec<HistoryEntry>,
    pub warning: Option<String>,
}

fn parse_history(raw: Option<String>) -> HistoryLoad {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return HistoryLoad::default();
    };

    let corrupt = || HistoryLoad {
        entries: Vec::new(),
        warning: Some(LOAD_WARNING.to_string()),
    };

    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("History record is not an array; ignoring it");
            return corrupt();
        }
        Err(e) => {
            warn!("History record is not valid JSON: {e}");
            return corrupt();
        }
    };

    let mut skipped = 0usize;
    let entries: Vec<HistoryEntry> = items
        .iter()
        .filter_map(|item| match HistoryEntry::from_stored(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping history entry: {e}");
                skipped += 1;
                None
            }
        })
        .collect();

    HistoryLoad {
        entries,
        warning: (skipped > 0).then(|| LOAD_WARNING.to_string()),
    }
}

pub fn load_history(storage: &Storage) -> Result<HistoryLoad, StoreError> {
    Ok(parse_history(storage.read_raw(HISTORY_KEY)?))
}

fn write_history(storage: &Storage, entries: &[HistoryEntry], id: &str) -> Result<(), StoreError> {
    storage.write_json(
        HISTORY_KEY,
        &entries,
        StoreEvent::HistoryChanged { id: id.to_string() },
    )
}

/// Prepends `entry`, replacing any entry with the same id, and truncates to the cap.
pub fn save_entry(storage: &Storage, entry: HistoryEntry) -> Result<HistoryEntry, StoreError> {
    let _guard = storage.lock();
    let mut entries = load_history(storage)?.entries;
    entries.retain(|existing| existing.id != entry.id);
    entries.insert(0, entry.clone());
    entries.truncate(storage.history_cap());
    write_history(storage, &entries, &entry.id)?;
    info!(id = %entry.id, total = entries.len(), "History entry saved");
    Ok(entry)
}

pub fn find_entry(storage: &Storage, id: &str) -> Result<Option<HistoryEntry>, StoreError> {
    Ok(load_history(storage)?
        .entries
        .into_iter()
        .find(|entry| entry.id == id))
}

pub fn latest_entry(storage: &Storage) -> Result<Option<HistoryEntry>, StoreError> {
    Ok(load_history(storage)?.entries.into_iter().next())
}

/// The entry with `id` when given and present, otherwise the most recent one.
pub fn resolve_entry(storage: &Storage, id: Option<&str>) -> Result<Option<HistoryEntry>, StoreError> {
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        if let Some(entry) = find_entry(storage, id)? {
            return Ok(Some(entry));
        }
    }
    latest_entry(storage)
}

/// Applies `mutate` to the stored entry, stamps `updated_at` and persists.
/// Returns `None` when no entry has that id.
pub fn update_entry<F>(storage: &Storage, id: &str, mutate: F) -> Result<Option<HistoryEntry>, StoreError>
where
    F: FnOnce(&mut HistoryEntry),
{
    let _guard = storage.lock();
    let mut entries = load_history(storage)?.entries;
    let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
        return Ok(None);
    };
    mutate(entry);
    entry.updated_at = Utc::now();
    let updated = entry.clone();
    write_history(storage, &entries, id)?;
    Ok(Some(updated))
}

/// Fills in anything an older record lacks. Writes back only when something changed.
pub fn refresh_on_view(
    storage: &Storage,
    mut entry: HistoryEntry,
    weights: &ScoreWeights,
) -> Result<HistoryEntry, StoreError> {
    if !entry.refresh(weights) {
        return Ok(entry);
    }
    let id = entry.id.clone();
    let stored = update_entry(storage, &id, |stored| {
        stored.refresh(weights);
    })?;
    Ok(stored.unwrap_or(entry))
}

pub fn set_skill_confidence(
    storage: &Storage,
    id: &str,
    skill: &str,
    confidence: SkillConfidence,
    weights: &ScoreWeights,
) -> Result<HistoryEntry, AppError> {
    let entry = find_entry(storage, id)?
        .ok_or_else(|| AppError::NotFound(format!("No analysis with id '{id}'")))?;
    if !entry.extracted_skills.all_skills().any(|s| s == skill) {
        return Err(AppError::Validation(format!(
            "'{skill}' was not detected in this analysis"
        )));
    }

    update_entry(storage, id, |stored| {
        stored.set_confidence(skill, confidence, weights);
    })?
    .ok_or_else(|| AppError::NotFound(format!("No analysis with id '{id}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::{run_analysis, AnalysisInput};
    use crate::storage::KeyValueStore;
    use serde_json::json;

    fn make_entry(id: &str, jd: &str) -> HistoryEntry {
        let weights = ScoreWeights::default();
        let input = AnalysisInput {
            company: "Acme".to_string(),
            role: "SDE".to_string(),
            jd_text: jd.to_string(),
        };
        HistoryEntry::from_analysis(id.to_string(), Utc::now(), run_analysis(&input, &weights), &weights)
    }

    fn storage_with_raw(raw: &str) -> Storage {
        let store = crate::storage::MemoryStore::default();
        store.set(HISTORY_KEY, raw).unwrap();
        Storage::new(Box::new(store), 50)
    }

    #[test]
    fn test_empty_history() {
        let storage = Storage::in_memory(50);
        let load = load_history(&storage).unwrap();
        assert!(load.entries.is_empty());
        assert_eq!(load.warning, None);
        assert_eq!(latest_entry(&storage).unwrap(), None);
    }

    #[test]
    fn test_save_prepends_and_dedupes() {
        let storage = Storage::in_memory(50);
        save_entry(&storage, make_entry("a", "React")).unwrap();
        save_entry(&storage, make_entry("b", "SQL")).unwrap();
        save_entry(&storage, make_entry("a", "DSA")).unwrap();

        let entries = load_history(&storage).unwrap().entries;
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(entries[0].jd_text, "DSA");
    }

    #[test]
    fn test_history_capped_and_oldest_evicted() {
        let storage = Storage::in_memory(50);
        for i in 0..51 {
            save_entry(&storage, make_entry(&format!("e{i}"), "React")).unwrap();
        }
        let entries = load_history(&storage).unwrap().entries;
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].id, "e50");
        assert!(entries.iter().all(|e| e.id != "e0"));
    }

    #[test]
    fn test_corrupt_record_warns() {
        for raw in ["{oops", r#"{"id": "x"}"#] {
            let load = load_history(&storage_with_raw(raw)).unwrap();
            assert!(load.entries.is_empty());
            assert_eq!(load.warning.as_deref(), Some(LOAD_WARNING));
        }
    }

    #[test]
    fn test_bad_element_skipped_rest_kept() {
        let good = serde_json::to_value(make_entry("good", "React")).unwrap();
        let raw = json!([good, {"id": "bad"}, 7]).to_string();
        let load = load_history(&storage_with_raw(&raw)).unwrap();
        assert_eq!(load.entries.len(), 1);
        assert_eq!(load.entries[0].id, "good");
        assert_eq!(load.warning.as_deref(), Some(LOAD_WARNING));
    }

    #[test]
    fn test_resolve_falls_back_to_latest() {
        let storage = Storage::in_memory(50);
        save_entry(&storage, make_entry("old", "React")).unwrap();
        save_entry(&storage, make_entry("new", "SQL")).unwrap();

        assert_eq!(resolve_entry(&storage, Some("old")).unwrap().unwrap().id, "old");
        assert_eq!(resolve_entry(&storage, Some("missing")).unwrap().unwrap().id, "new");
        assert_eq!(resolve_entry(&storage, None).unwrap().unwrap().id, "new");
    }

    #[test]
    fn test_update_missing_returns_none() {
        let storage = Storage::in_memory(50);
        assert_eq!(update_entry(&storage, "nope", |_| {}).unwrap(), None);
    }

    #[test]
    fn test_set_skill_confidence_persists_score() {
        let storage = Storage::in_memory(50);
        let weights = ScoreWeights::default();
        let saved = save_entry(&storage, make_entry("a", "DSA and React")).unwrap();

        let updated =
            set_skill_confidence(&storage, "a", "React", SkillConfidence::Know, &weights).unwrap();
        assert_eq!(updated.final_score, saved.final_score + 4);
        assert!(updated.updated_at >= saved.updated_at);

        let reloaded = find_entry(&storage, "a").unwrap().unwrap();
        assert_eq!(reloaded.final_score, updated.final_score);
        assert_eq!(
            reloaded.skill_confidence_map.get("React"),
            Some(&SkillConfidence::Know)
        );
    }

    #[test]
    fn test_set_skill_confidence_errors() {
        let storage = Storage::in_memory(50);
        let weights = ScoreWeights::default();
        save_entry(&storage, make_entry("a", "React")).unwrap();

        assert!(matches!(
            set_skill_confidence(&storage, "zzz", "React", SkillConfidence::Know, &weights),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            set_skill_confidence(&storage, "a", "Kotlin", SkillConfidence::Know, &weights),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_refresh_on_view_writes_only_when_changed() {
        let legacy = json!([{
            "id": "legacy",
            "createdAt": "2024-01-01T00:00:00Z",
            "jdText": "React",
            "extractedSkills": {"web": ["React"]},
            "baseScore": 50
        }]);
        let storage = storage_with_raw(&legacy.to_string());
        let weights = ScoreWeights::default();
        let mut rx = storage.subscribe();

        let entry = find_entry(&storage, "legacy").unwrap().unwrap();
        let refreshed = refresh_on_view(&storage, entry, &weights).unwrap();
        assert_eq!(refreshed.final_score, 48);
        assert!(!refreshed.round_mapping.is_empty());
        assert_eq!(
            rx.try_recv().unwrap(),
            StoreEvent::HistoryChanged { id: "legacy".to_string() }
        );

        let again = refresh_on_view(&storage, refreshed, &weights).unwrap();
        assert_eq!(again.final_score, 48);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_save_publishes_history_event() {
        let storage = Storage::in_memory(50);
        let mut rx = storage.subscribe();
        save_entry(&storage, make_entry("a", "React")).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            StoreEvent::HistoryChanged { id: "a".to_string() }
        );
    }
}
