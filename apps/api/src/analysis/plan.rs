//! Weekly Planner: a fixed seven-day schedule with append-only extras.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::SkillCategory;
use crate::analysis::skills::ExtractedSkills;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub focus: String,
    pub tasks: Vec<String>,
}

const BASE_PLAN: [(&str, &str, &str); 7] = [
    (
        "Day 1",
        "Basics + Core CS",
        "Revise OOP, DBMS, OS, and Networks with short concept notes.",
    ),
    (
        "Day 2",
        "Basics + Core CS",
        "Continue core CS revision and solve aptitude drills under time limits.",
    ),
    (
        "Day 3",
        "DSA + Coding Practice",
        "Solve array/string/hashmap questions and explain time-space complexity.",
    ),
    (
        "Day 4",
        "DSA + Coding Practice",
        "Practice recursion, trees, and sorting/searching patterns.",
    ),
    (
        "Day 5",
        "Project + Resume Alignment",
        "Align resume bullets with measurable impact and project depth.",
    ),
    (
        "Day 6",
        "Mock Interview Questions",
        "Run one technical mock and one HR mock with feedback notes.",
    ),
    (
        "Day 7",
        "Revision + Weak Areas",
        "Revise weak topics and rehearse concise interview answers.",
    ),
];

pub fn build_weekly_plan(skills: &ExtractedSkills) -> Vec<DayPlan> {
    let mut plan: Vec<DayPlan> = BASE_PLAN
        .iter()
        .map(|(day, focus, task)| DayPlan {
            day: day.to_string(),
            focus: focus.to_string(),
            tasks: vec![task.to_string()],
        })
        .collect();

    let mut append = |day_index: usize, task: &str| plan[day_index].tasks.push(task.to_string());

    if skills.contains(SkillCategory::Web, "React") {
        append(4, "Add frontend revision on React rendering, hooks, and state flow.");
    }
    if skills.contains(SkillCategory::Web, "Next.js") {
        append(4, "Include SSR/SSG revision for Next.js architecture discussions.");
    }
    if skills.contains(SkillCategory::Data, "SQL") {
        append(3, "Add SQL query practice with joins and indexing scenarios.");
    }
    if skills.has_any(SkillCategory::Cloud) {
        append(5, "Include one deployment troubleshooting simulation.");
    }
    if skills.has_any(SkillCategory::Other) {
        append(0, "Review communication, projects, and problem-solving fundamentals.");
        append(6, "Prioritize confidence-building revision for interview basics.");
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::extract_skills;

    #[test]
    fn test_always_seven_days_with_base_task_first() {
        for jd in ["", "React Next.js SQL AWS"] {
            let plan = build_weekly_plan(&extract_skills(jd));
            assert_eq!(plan.len(), 7);
            for (day, (label, focus, task)) in plan.iter().zip(BASE_PLAN.iter()) {
                assert_eq!(day.day, *label);
                assert_eq!(day.focus, *focus);
                assert_eq!(day.tasks[0], *task);
            }
        }
    }

    #[test]
    fn test_react_without_next_adds_one_task_to_day_five() {
        let plan = build_weekly_plan(&extract_skills("React and Node.js"));
        assert_eq!(plan[4].tasks.len(), 2);
        assert!(plan[4].tasks[1].contains("React rendering"));
    }

    #[test]
    fn test_all_extras() {
        let plan = build_weekly_plan(&extract_skills("React, Next.js, SQL, GCP"));
        assert_eq!(plan[4].tasks.len(), 3);
        assert_eq!(plan[3].tasks.len(), 2);
        assert_eq!(plan[5].tasks.len(), 2);
        assert_eq!(plan[0].tasks.len(), 1);
        assert_eq!(plan[6].tasks.len(), 1);
    }

    #[test]
    fn test_fallback_extends_first_and_last_day() {
        let plan = build_weekly_plan(&extract_skills("nothing relevant here"));
        assert_eq!(plan[0].tasks.len(), 2);
        assert_eq!(plan[6].tasks.len(), 2);
        assert!(plan[1..6].iter().all(|d| d.tasks.len() == 1));
    }
}
