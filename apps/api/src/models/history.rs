use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::catalog::{SkillCategory, DEFAULT_OTHER_SKILLS};
use crate::analysis::checklist::ChecklistRound;
use crate::analysis::company::{generate_company_intel, CompanyIntel};
use crate::analysis::engine::AnalysisResult;
use crate::analysis::plan::DayPlan;
use crate::analysis::rounds::{generate_round_mapping, RoundInfo};
use crate::analysis::scoring::{
    compute_final_score, default_confidence_map, merge_confidence, ConfidenceMap, ScoreWeights,
    SkillConfidence, MAX_SCORE,
};
use crate::analysis::skills::ExtractedSkills;

/// One persisted analysis run. Identity is `id`, an opaque token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: ExtractedSkills,
    pub company_intel: CompanyIntel,
    pub round_mapping: Vec<RoundInfo>,
    pub checklist: Vec<ChecklistRound>,
    pub plan_7_days: Vec<DayPlan>,
    pub questions: Vec<String>,
    pub base_score: u32,
    pub skill_confidence_map: ConfidenceMap,
    pub final_score: u32,
    pub updated_at: DateTime<Utc>,
}

/// Why a stored element could not be turned into a [`HistoryEntry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("stored entry is not an object")]
    NotAnObject,

    #[error("stored entry has no id")]
    MissingId,

    #[error("stored entry has no valid created_at timestamp")]
    InvalidCreatedAt,

    #[error("stored entry has no JD text")]
    MissingJdText,
}

impl HistoryEntry {
    /// Builds a fresh entry from an analysis run. Every detected skill starts at
    /// `practice`, so the final score already reflects the default confidence.
    pub fn from_analysis(
        id: String,
        now: DateTime<Utc>,
        result: AnalysisResult,
        weights: &ScoreWeights,
    ) -> Self {
        let skill_confidence_map = default_confidence_map(&result.extracted_skills);
        let final_score = compute_final_score(result.base_score, &skill_confidence_map, weights);
        HistoryEntry {
            id,
            created_at: now,
            company: result.company,
            role: result.role,
            jd_text: result.jd_text,
            extracted_skills: result.extracted_skills,
            company_intel: result.company_intel,
            round_mapping: result.round_mapping,
            checklist: result.checklist,
            plan_7_days: result.plan_7_days,
            questions: result.questions,
            base_score: result.base_score,
            skill_confidence_map,
            final_score,
            updated_at: now,
        }
    }

    /// Validating deserializer for one stored element.
    ///
    /// `id`, `created_at` and `jd_text` are mandatory; every other field is defaulted
    /// when missing or malformed. Legacy camelCase keys are accepted.
    pub fn from_stored(value: &Value) -> Result<Self, EntryError> {
        let obj = value.as_object().ok_or(EntryError::NotAnObject)?;

        let id = non_empty_str(obj, &["id"]).ok_or(EntryError::MissingId)?;
        let created_at = timestamp(obj, &["created_at", "createdAt"])
            .ok_or(EntryError::InvalidCreatedAt)?;
        let jd_text = non_empty_str(obj, &["jd_text", "jdText"]).ok_or(EntryError::MissingJdText)?;

        let company = string_or_empty(obj, &["company"]);
        let role = string_or_empty(obj, &["role"]);
        let extracted_skills = normalize_skills(first_present(obj, &["extracted_skills", "extractedSkills"]));

        let company_intel = first_present(obj, &["company_intel", "companyIntel"])
            .and_then(|v| serde_json::from_value::<CompanyIntel>(v.clone()).ok())
            .unwrap_or_else(|| generate_company_intel(&company, &jd_text));

        let stored_map = normalize_confidence(first_present(
            obj,
            &["skill_confidence_map", "skillConfidenceMap"],
        ));
        let skill_confidence_map = merge_confidence(&extracted_skills, &stored_map);

        let base_score = score(obj, &["base_score", "baseScore", "baseReadinessScore", "readinessScore"])
            .unwrap_or(0);
        let final_score = score(obj, &["final_score", "finalScore", "readinessScore"]).unwrap_or(base_score);

        let updated_at = timestamp(obj, &["updated_at", "updatedAt"]).unwrap_or(created_at);

        Ok(HistoryEntry {
            id,
            created_at,
            company,
            role,
            jd_text,
            extracted_skills,
            company_intel,
            round_mapping: normalize_rounds(first_present(obj, &["round_mapping", "roundMapping"])),
            checklist: normalize_checklist(first_present(obj, &["checklist"])),
            plan_7_days: normalize_plan(first_present(obj, &["plan_7_days", "plan7Days", "plan"])),
            questions: string_list(first_present(obj, &["questions"])),
            base_score,
            skill_confidence_map,
            final_score,
            updated_at,
        })
    }

    /// View-time refresh: regenerates an empty round mapping, fills confidence
    /// defaults and recomputes the final score. Returns whether anything changed.
    pub fn refresh(&mut self, weights: &ScoreWeights) -> bool {
        let mut changed = false;

        if self.round_mapping.is_empty() {
            self.round_mapping = generate_round_mapping(&self.extracted_skills, &self.company_intel);
            changed = true;
        }

        let merged = merge_confidence(&self.extracted_skills, &self.skill_confidence_map);
        if merged != self.skill_confidence_map {
            self.skill_confidence_map = merged;
            changed = true;
        }

        let final_score = compute_final_score(self.base_score, &self.skill_confidence_map, weights);
        if final_score != self.final_score {
            self.final_score = final_score;
            changed = true;
        }

        changed
    }

    /// Sets one skill's confidence and recomputes the final score.
    /// Returns `false` (and changes nothing) when the skill was not detected.
    pub fn set_confidence(
        &mut self,
        skill: &str,
        confidence: SkillConfidence,
        weights: &ScoreWeights,
    ) -> bool {
        if !self.extracted_skills.all_skills().any(|s| s == skill) {
            return false;
        }
        self.skill_confidence_map.insert(skill.to_string(), confidence);
        self.final_score = compute_final_score(self.base_score, &self.skill_confidence_map, weights);
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field normalizers
// ────────────────────────────────────────────────────────────────────────────

fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn non_empty_str(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(obj, keys)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_or_empty(obj: &Map<String, Value>, keys: &[&str]) -> String {
    first_present(obj, keys)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn timestamp(obj: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    first_present(obj, keys)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn score(obj: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_f64))
        .find(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, f64::from(MAX_SCORE)) as u32)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn field_str(obj: &Map<String, Value>, keys: &[&str]) -> String {
    string_or_empty(obj, keys)
}

fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn category_aliases(category: SkillCategory) -> [&'static str; 2] {
    match category {
        SkillCategory::Other => ["other", "General"],
        _ => [category.key(), category.label()],
    }
}

fn normalize_skills(value: Option<&Value>) -> ExtractedSkills {
    let mut skills = ExtractedSkills::default();
    if let Some(obj) = value.and_then(Value::as_object) {
        for category in SkillCategory::ALL {
            *skills.get_mut(category) = string_list(first_present(obj, &category_aliases(category)));
        }
    }
    if skills.all_skills().next().is_none() {
        skills.other = DEFAULT_OTHER_SKILLS.iter().map(|s| s.to_string()).collect();
    }
    skills
}

fn normalize_confidence(value: Option<&Value>) -> ConfidenceMap {
    value
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .map(|(skill, v)| {
                    let confidence = if v.as_str() == Some("know") {
                        SkillConfidence::Know
                    } else {
                        SkillConfidence::Practice
                    };
                    (skill.clone(), confidence)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn normalize_rounds(value: Option<&Value>) -> Vec<RoundInfo> {
    objects(value)
        .map(|item| RoundInfo {
            round_title: field_str(item, &["round_title", "roundTitle", "title"]),
            focus_areas: string_list(first_present(item, &["focus_areas", "focusAreas"])),
            why_it_matters: field_str(item, &["why_it_matters", "whyItMatters", "why"]),
        })
        .collect()
}

fn normalize_checklist(value: Option<&Value>) -> Vec<ChecklistRound> {
    objects(value)
        .map(|item| ChecklistRound {
            round_title: field_str(item, &["round_title", "roundTitle", "round"]),
            items: string_list(first_present(item, &["items"])),
        })
        .collect()
}

fn normalize_plan(value: Option<&Value>) -> Vec<DayPlan> {
    objects(value)
        .map(|item| {
            let focus = field_str(item, &["focus", "title"]);
            let mut tasks = string_list(first_present(item, &["tasks"]));
            if tasks.is_empty() && !focus.is_empty() {
                tasks.push(focus.clone());
            }
            DayPlan {
                day: field_str(item, &["day"]),
                focus,
                tasks,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::engine::{run_analysis, AnalysisInput};
    use serde_json::json;

    fn sample_entry() -> HistoryEntry {
        let input = AnalysisInput {
            company: "Amazon".to_string(),
            role: "SDE".to_string(),
            jd_text: "DSA, Java, React and AWS".to_string(),
        };
        let weights = ScoreWeights::default();
        HistoryEntry::from_analysis(
            "entry-1".to_string(),
            Utc::now(),
            run_analysis(&input, &weights),
            &weights,
        )
    }

    #[test]
    fn test_from_analysis_defaults_confidence_to_practice() {
        let entry = sample_entry();
        assert_eq!(entry.skill_confidence_map.len(), 4);
        assert_eq!(entry.final_score, entry.base_score - 8);
    }

    #[test]
    fn test_serialized_entry_reads_back_identically() {
        let entry = sample_entry();
        let value = serde_json::to_value(&entry).unwrap();
        let restored = HistoryEntry::from_stored(&value).unwrap();
        assert_eq!(restored, entry);
    }

    #[test]
    fn test_mandatory_fields_rejected() {
        assert_eq!(HistoryEntry::from_stored(&json!(42)), Err(EntryError::NotAnObject));
        assert_eq!(
            HistoryEntry::from_stored(&json!({"created_at": "2024-01-01T00:00:00Z", "jd_text": "x"})),
            Err(EntryError::MissingId)
        );
        assert_eq!(
            HistoryEntry::from_stored(&json!({"id": "a", "created_at": "yesterday", "jd_text": "x"})),
            Err(EntryError::InvalidCreatedAt)
        );
        assert_eq!(
            HistoryEntry::from_stored(&json!({"id": "a", "created_at": "2024-01-01T00:00:00Z", "jd_text": ""})),
            Err(EntryError::MissingJdText)
        );
    }

    #[test]
    fn test_legacy_camel_case_record_is_normalized() {
        let legacy = json!({
            "id": "legacy-1",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "company": "Startup",
            "role": 7,
            "jdText": "React and SQL",
            "extractedSkills": {"Web": ["React"], "Data": ["SQL"]},
            "roundMapping": [{"title": "Round 1", "why": "because"}, null],
            "checklist": [{"round": "Round 1: Basics", "items": ["a", "b"]}],
            "plan": [{"day": "Day 1", "title": "Warmup"}],
            "questions": ["q1", 2],
            "readinessScore": 64,
            "skillConfidenceMap": {"React": "know", "SQL": "maybe", "Rust": "know"}
        });

        let entry = HistoryEntry::from_stored(&legacy).unwrap();
        assert_eq!(entry.role, "");
        assert_eq!(entry.extracted_skills.web, vec!["React"]);
        assert_eq!(entry.extracted_skills.data, vec!["SQL"]);
        assert!(entry.extracted_skills.other.is_empty());
        assert_eq!(entry.round_mapping.len(), 1);
        assert_eq!(entry.round_mapping[0].round_title, "Round 1");
        assert_eq!(entry.round_mapping[0].why_it_matters, "because");
        assert_eq!(entry.checklist[0].round_title, "Round 1: Basics");
        assert_eq!(entry.plan_7_days[0].focus, "Warmup");
        assert_eq!(entry.plan_7_days[0].tasks, vec!["Warmup"]);
        assert_eq!(entry.questions, vec!["q1", "2"]);
        assert_eq!(entry.base_score, 64);
        assert_eq!(entry.final_score, 64);
        assert_eq!(entry.updated_at, entry.created_at);
        assert_eq!(entry.company_intel.company_name, "Startup");
        assert_eq!(entry.skill_confidence_map.get("React"), Some(&SkillConfidence::Know));
        assert_eq!(entry.skill_confidence_map.get("SQL"), Some(&SkillConfidence::Practice));
        assert!(!entry.skill_confidence_map.contains_key("Rust"));
    }

    #[test]
    fn test_refresh_recomputes_and_reports_change() {
        let legacy = json!({
            "id": "legacy-2",
            "createdAt": "2024-03-01T10:00:00Z",
            "jdText": "React and SQL",
            "extractedSkills": {"web": ["React"], "data": ["SQL"]},
            "baseScore": 50
        });
        let mut entry = HistoryEntry::from_stored(&legacy).unwrap();
        assert!(entry.round_mapping.is_empty());

        let weights = ScoreWeights::default();
        assert!(entry.refresh(&weights));
        assert_eq!(entry.round_mapping.len(), 3);
        assert_eq!(entry.final_score, 46);
        assert!(!entry.refresh(&weights));
    }

    #[test]
    fn test_set_confidence_only_for_detected_skills() {
        let weights = ScoreWeights::default();
        let mut entry = sample_entry();
        let before = entry.final_score;
        assert!(entry.set_confidence("DSA", SkillConfidence::Know, &weights));
        assert_eq!(entry.final_score, before + 4);
        assert!(!entry.set_confidence("Haskell", SkillConfidence::Know, &weights));
        assert_eq!(entry.final_score, before + 4);
    }

    #[test]
    fn test_empty_skills_get_fallback() {
        let entry = HistoryEntry::from_stored(&json!({
            "id": "e",
            "created_at": "2024-01-01T00:00:00Z",
            "jd_text": "text"
        }))
        .unwrap();
        assert_eq!(entry.extracted_skills.other.len(), 4);
        assert_eq!(entry.skill_confidence_map.len(), 4);
    }
}
