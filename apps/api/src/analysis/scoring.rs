//! Score Calculator: readiness heuristics.
//!
//! The base score is a monotone completeness heuristic, not a statistical model:
//! `base + per_category × categories + per_field × (company, role) + long-JD bonus`,
//! clamped to 0–100. The final score nudges the base by the per-skill confidence
//! toggles and is recomputed on every toggle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::skills::ExtractedSkills;

/// Tuning constants for the readiness score. Defaults are 35 / 5 / 10 / 10 / 800 / 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub base: u32,
    pub per_category: u32,
    pub per_field: u32,
    pub long_jd_bonus: u32,
    /// JD character count that must be exceeded to earn the bonus.
    pub long_jd_threshold: usize,
    pub confidence_step: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base: 35,
            per_category: 5,
            per_field: 10,
            long_jd_bonus: 10,
            long_jd_threshold: 800,
            confidence_step: 2,
        }
    }
}

pub const MAX_SCORE: u32 = 100;
const MAX_SCORED_CATEGORIES: usize = 6;

/// Per-skill self-assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillConfidence {
    Know,
    #[default]
    Practice,
}

/// Skill name → confidence. Sorted so serialization is stable.
pub type ConfidenceMap = BTreeMap<String, SkillConfidence>;

pub fn compute_base_score(
    company: &str,
    role: &str,
    jd_text: &str,
    skills: &ExtractedSkills,
    weights: &ScoreWeights,
) -> u32 {
    let categories = skills.detected_category_count().min(MAX_SCORED_CATEGORIES) as u32;

    let mut score = weights.base + weights.per_category * categories;
    if !company.trim().is_empty() {
        score += weights.per_field;
    }
    if !role.trim().is_empty() {
        score += weights.per_field;
    }
    if jd_text.chars().count() > weights.long_jd_threshold {
        score += weights.long_jd_bonus;
    }
    score.min(MAX_SCORE)
}

/// `clamp(base + step × know − step × practice, 0, 100)`.
pub fn compute_final_score(base: u32, confidence: &ConfidenceMap, weights: &ScoreWeights) -> u32 {
    let step = i64::from(weights.confidence_step);
    let delta: i64 = confidence
        .values()
        .map(|c| match c {
            SkillConfidence::Know => step,
            SkillConfidence::Practice => -step,
        })
        .sum();
    (i64::from(base) + delta).clamp(0, i64::from(MAX_SCORE)) as u32
}

/// Every detected skill mapped to `practice`.
pub fn default_confidence_map(skills: &ExtractedSkills) -> ConfidenceMap {
    merge_confidence(skills, &ConfidenceMap::new())
}

/// Keeps existing answers for detected skills, defaults the rest to `practice`
/// and drops entries for skills that were not detected.
pub fn merge_confidence(skills: &ExtractedSkills, existing: &ConfidenceMap) -> ConfidenceMap {
    skills
        .all_skills()
        .map(|skill| {
            let confidence = existing.get(skill).copied().unwrap_or_default();
            (skill.to_string(), confidence)
        })
        .collect()
}

/// First `limit` detected skills still marked `practice`, in catalog order.
pub fn weak_skills(skills: &ExtractedSkills, confidence: &ConfidenceMap, limit: usize) -> Vec<String> {
    skills
        .all_skills()
        .filter(|skill| {
            confidence.get(*skill).copied().unwrap_or_default() == SkillConfidence::Practice
        })
        .take(limit)
        .map(str::to_string)
        .collect()
}
