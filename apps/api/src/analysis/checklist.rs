//! Checklist Builder: four fixed preparation rounds of five items each.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::SkillCategory;
use crate::analysis::skills::ExtractedSkills;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRound {
    pub round_title: String,
    pub items: Vec<String>,
}

fn pick(condition: bool, when_true: &str, when_false: &str) -> String {
    if condition { when_true } else { when_false }.to_string()
}

fn round(title: &str, items: Vec<String>) -> ChecklistRound {
    ChecklistRound {
        round_title: title.to_string(),
        items,
    }
}

pub fn build_checklist(skills: &ExtractedSkills) -> Vec<ChecklistRound> {
    let has_dsa = skills.contains(SkillCategory::CoreCs, "DSA");
    let has_web = skills.has_any(SkillCategory::Web);
    let has_data = skills.has_any(SkillCategory::Data);
    let has_cloud = skills.has_any(SkillCategory::Cloud);
    let has_testing = skills.has_any(SkillCategory::Testing);
    let only_fallback = skills.is_fallback();
    let first_language = skills
        .languages
        .first()
        .map(String::as_str)
        .unwrap_or("programming language");

    vec![
        round(
            "Round 1: Aptitude / Basics",
            vec![
                "Revise quantitative aptitude fundamentals and timed practice sets.".to_string(),
                "Prepare concise introductions for academics, projects, and goals.".to_string(),
                format!(
                    "Review {first_language} syntax, control flow, and standard library basics."
                ),
                "Practice 20-minute problem solving under strict time limits.".to_string(),
                "Build a one-page quick notes sheet for formulas and CS basics.".to_string(),
            ],
        ),
        round(
            "Round 2: DSA + Core CS",
            vec![
                pick(
                    has_dsa,
                    "Solve arrays, strings, and binary search patterns with complexity analysis.",
                    "Practice beginner-to-intermediate DSA patterns with clean dry-run explanations.",
                ),
                "Revise OOP, DBMS, OS, and Networks interview fundamentals.".to_string(),
                pick(
                    has_data,
                    "Practice SQL joins, indexing, and query optimization drills.",
                    "Prepare core DBMS concepts including normalization and transactions.",
                ),
                "Write edge-case focused solutions and explain trade-offs aloud.".to_string(),
                pick(
                    only_fallback,
                    "Practice clear problem-solving communication for open-ended coding tasks.",
                    "Practice whiteboard-style walkthroughs for one medium coding problem daily.",
                ),
            ],
        ),
        round(
            "Round 3: Tech interview (projects + stack)",
            vec![
                "Prepare one flagship project story: architecture, decisions, trade-offs, impact."
                    .to_string(),
                pick(
                    has_web,
                    "Map project modules to React/Node API flow and explain state + data contracts.",
                    "Explain end-to-end project request flow and module boundaries.",
                ),
                pick(
                    has_cloud,
                    "Explain deployment strategy, observability, and rollback plan.",
                    "Define deployment basics, logs, and error triage approach.",
                ),
                pick(
                    has_testing,
                    "Show testing pyramid coverage with framework-specific examples.",
                    "Prepare unit + integration testing examples from your project.",
                ),
                "Create a backlog of 10 technical follow-up questions and answers.".to_string(),
            ],
        ),
        round(
            "Round 4: Managerial / HR",
            vec![
                "Prepare STAR-format stories for ownership, conflict resolution, and setbacks."
                    .to_string(),
                "Align your role motivation with company domain and growth trajectory.".to_string(),
                "Prepare salary, relocation, and notice-period responses with clarity.".to_string(),
                "Draft 5 thoughtful questions for interviewer about team and roadmap.".to_string(),
                "Practice calm and concise responses for strengths, weaknesses, and goals."
                    .to_string(),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::extract_skills;

    #[test]
    fn test_shape_is_four_rounds_of_five() {
        for jd in ["", "DSA SQL React AWS Selenium Java"] {
            let checklist = build_checklist(&extract_skills(jd));
            assert_eq!(checklist.len(), 4);
            assert!(checklist.iter().all(|r| r.items.len() == 5));
        }
    }

    #[test]
    fn test_fallback_variants() {
        let checklist = build_checklist(&extract_skills(""));
        assert_eq!(
            checklist[0].items[2],
            "Review programming language syntax, control flow, and standard library basics."
        );
        assert!(checklist[1].items[0].starts_with("Practice beginner-to-intermediate DSA"));
        assert!(checklist[1].items[4].starts_with("Practice clear problem-solving"));
        assert!(checklist[2].items[1].starts_with("Explain end-to-end project request flow"));
    }

    #[test]
    fn test_detected_variants() {
        let checklist = build_checklist(&extract_skills(
            "DSA, Python, SQL, React, Docker and Cypress",
        ));
        assert_eq!(
            checklist[0].items[2],
            "Review Python syntax, control flow, and standard library basics."
        );
        assert!(checklist[1].items[0].starts_with("Solve arrays, strings"));
        assert!(checklist[1].items[2].starts_with("Practice SQL joins"));
        assert!(checklist[1].items[4].starts_with("Practice whiteboard-style"));
        assert!(checklist[2].items[1].starts_with("Map project modules"));
        assert!(checklist[2].items[2].starts_with("Explain deployment strategy"));
        assert!(checklist[2].items[3].starts_with("Show testing pyramid"));
    }
}
