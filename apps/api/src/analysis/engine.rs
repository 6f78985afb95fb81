//! Analysis Orchestrator: runs the pipeline in a fixed order and returns one
//! aggregate result.
//!
//! Pure and deterministic: no clock, no randomness, no I/O. Identical inputs produce
//! byte-identical serialized output.

use serde::{Deserialize, Serialize};

use crate::analysis::checklist::{build_checklist, ChecklistRound};
use crate::analysis::company::{generate_company_intel, CompanyIntel};
use crate::analysis::plan::{build_weekly_plan, DayPlan};
use crate::analysis::questions::select_questions;
use crate::analysis::rounds::{select_round_template, RoundInfo, RoundTemplate};
use crate::analysis::scoring::{compute_base_score, ScoreWeights};
use crate::analysis::skills::{extract_skills, ExtractedSkills};
use crate::errors::AppError;

pub const EMPTY_JD_MESSAGE: &str = "Paste a job description to run analysis.";
pub const SHORT_JD_ADVISORY: &str =
    "This JD is too short to analyze deeply. Paste full JD for better output.";
/// Trimmed JD texts shorter than this get the advisory.
pub const SHORT_JD_CHARS: usize = 200;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub jd_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: ExtractedSkills,
    pub company_intel: CompanyIntel,
    pub round_template: RoundTemplate,
    pub round_mapping: Vec<RoundInfo>,
    pub checklist: Vec<ChecklistRound>,
    pub plan_7_days: Vec<DayPlan>,
    pub questions: Vec<String>,
    pub base_score: u32,
}

/// Blocks blank JD text; returns a non-blocking advisory for short text.
pub fn validate_input(jd_text: &str) -> Result<Option<&'static str>, AppError> {
    let trimmed = jd_text.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(EMPTY_JD_MESSAGE.to_string()));
    }
    if trimmed.chars().count() < SHORT_JD_CHARS {
        return Ok(Some(SHORT_JD_ADVISORY));
    }
    Ok(None)
}

/// extractor → profiler → round mapper → checklist → planner → questions → score.
pub fn run_analysis(input: &AnalysisInput, weights: &ScoreWeights) -> AnalysisResult {
    let company = input.company.trim();
    let role = input.role.trim();

    let extracted_skills = extract_skills(&input.jd_text);
    let company_intel = generate_company_intel(company, &input.jd_text);
    let round_template = select_round_template(&extracted_skills, &company_intel);
    let round_mapping = round_template.rounds();
    let checklist = build_checklist(&extracted_skills);
    let plan_7_days = build_weekly_plan(&extracted_skills);
    let questions = select_questions(&extracted_skills);
    let base_score = compute_base_score(company, role, &input.jd_text, &extracted_skills, weights);

    AnalysisResult {
        company: company.to_string(),
        role: role.to_string(),
        jd_text: input.jd_text.clone(),
        extracted_skills,
        company_intel,
        round_template,
        round_mapping,
        checklist,
        plan_7_days,
        questions,
        base_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::company::SizeCategory;
    use proptest::prelude::*;

    fn input(company: &str, role: &str, jd: &str) -> AnalysisInput {
        AnalysisInput {
            company: company.to_string(),
            role: role.to_string(),
            jd_text: jd.to_string(),
        }
    }

    #[test]
    fn test_validate_blocks_blank_text() {
        assert!(matches!(validate_input(""), Err(AppError::Validation(_))));
        assert!(matches!(validate_input("  \n\t "), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validate_short_text_is_advisory_only() {
        assert_eq!(validate_input("React developer").unwrap(), Some(SHORT_JD_ADVISORY));
        let long = "Backend engineer ".repeat(20);
        assert_eq!(validate_input(&long).unwrap(), None);
    }

    #[test]
    fn test_startup_web_example() {
        let result = run_analysis(
            &input("BrightStartup", "", "We build with React and Node.js."),
            &ScoreWeights::default(),
        );
        assert_eq!(result.company_intel.size_category, SizeCategory::Startup);
        assert_eq!(result.round_template, RoundTemplate::StartupWeb);
        assert_eq!(result.round_mapping.len(), 3);
        assert_eq!(result.plan_7_days[4].tasks.len(), 2);
        assert_eq!(result.base_score, 35 + 5 + 10);
    }

    #[test]
    fn test_enterprise_dsa_example() {
        let result = run_analysis(
            &input("Amazon", "SDE 1", "Strong DSA, React, Node.js, SQL and AWS."),
            &ScoreWeights::default(),
        );
        assert_eq!(result.company_intel.size_category, SizeCategory::Enterprise);
        assert!(result.extracted_skills.core_cs.contains(&"DSA".to_string()));
        assert_eq!(result.round_template, RoundTemplate::EnterpriseDsa);
        assert_eq!(result.round_mapping.len(), 4);
    }

    #[test]
    fn test_outputs_have_fixed_shapes() {
        let result = run_analysis(&input("", "", ""), &ScoreWeights::default());
        assert_eq!(result.checklist.len(), 4);
        assert_eq!(result.plan_7_days.len(), 7);
        assert_eq!(result.questions.len(), 10);
        assert_eq!(result.base_score, 35);
    }

    #[test]
    fn test_company_and_role_are_trimmed() {
        let result = run_analysis(&input("  Amazon ", " SDE\n", "DSA"), &ScoreWeights::default());
        assert_eq!(result.company, "Amazon");
        assert_eq!(result.role, "SDE");
        assert_eq!(result.company_intel.company_name, "Amazon");
    }

    proptest! {
        #[test]
        fn prop_analysis_is_deterministic(
            company in "[A-Za-z ]{0,12}",
            role in "[A-Za-z ]{0,12}",
            jd in "(DSA|React|Node\\.js|SQL|AWS|Java|C\\+\\+|padding| ){0,40}",
        ) {
            let weights = ScoreWeights::default();
            let first = run_analysis(&input(&company, &role, &jd), &weights);
            let second = run_analysis(&input(&company, &role, &jd), &weights);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }

        #[test]
        fn prop_every_category_present_and_fallback_exact(jd in "[a-zA-Z .+#]{0,80}") {
            let result = run_analysis(&input("", "", &jd), &ScoreWeights::default());
            let json = serde_json::to_value(&result.extracted_skills).unwrap();
            prop_assert_eq!(json.as_object().unwrap().len(), 7);
            if result.extracted_skills.detected_category_count() == 0 {
                prop_assert_eq!(
                    result.extracted_skills.other.clone(),
                    vec!["Communication", "Problem solving", "Basic coding", "Projects"]
                );
            }
        }

        #[test]
        fn prop_questions_unique_and_bounded(jd in "(DSA|OOP|React|Redis|Go|Linux|JUnit|SQL| ){0,30}") {
            let result = run_analysis(&input("", "", &jd), &ScoreWeights::default());
            prop_assert!(result.questions.len() <= 10);
            let unique: std::collections::HashSet<_> = result.questions.iter().collect();
            prop_assert_eq!(unique.len(), result.questions.len());
        }
    }
}
