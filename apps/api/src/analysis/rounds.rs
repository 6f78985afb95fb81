//! Round Mapper: picks one of three fixed interview-round templates.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::SkillCategory;
use crate::analysis::company::{CompanyIntel, SizeCategory};
use crate::analysis::skills::ExtractedSkills;

/// One interview stage with its focus areas and why it matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    pub round_title: String,
    pub focus_areas: Vec<String>,
    pub why_it_matters: String,
}

/// The three templates. Exactly one is selected per analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundTemplate {
    EnterpriseDsa,
    StartupWeb,
    Generic,
}

type RoundSource = (&'static str, &'static [&'static str], &'static str);

const ENTERPRISE_ROUNDS: &[RoundSource] = &[
    (
        "Round 1: Online Test (DSA + Aptitude)",
        &["DSA", "Aptitude"],
        "Enterprise pipelines prioritize high-volume objective filtering for speed and consistency.",
    ),
    (
        "Round 2: Technical (DSA + Core CS)",
        &["DSA", "Core CS"],
        "Interviewers validate depth in data structures, algorithms, and computer science fundamentals.",
    ),
    (
        "Round 3: Tech + Projects",
        &["Projects", "Stack depth"],
        "Project discussions reveal practical ownership, debugging style, and design decisions.",
    ),
    (
        "Round 4: HR",
        &["Communication", "Role fit"],
        "Final fit checks ensure role alignment, communication clarity, and long-term intent.",
    ),
];

const STARTUP_ROUNDS: &[RoundSource] = &[
    (
        "Round 1: Practical Coding",
        &["Practical coding", "Stack depth"],
        "Startups emphasize execution speed and code quality on real feature-like tasks.",
    ),
    (
        "Round 2: System Discussion",
        &["Architecture", "Trade-offs"],
        "Teams evaluate architecture judgment, trade-offs, and scalability awareness.",
    ),
    (
        "Round 3: Culture Fit",
        &["Ownership", "Communication"],
        "Small teams prioritize ownership mindset, communication, and adaptability.",
    ),
];

const GENERIC_ROUNDS: &[RoundSource] = &[
    (
        "Round 1: Screening + Basics",
        &["Aptitude", "Communication"],
        "The first round filters for baseline aptitude and communication readiness.",
    ),
    (
        "Round 2: Technical Evaluation",
        &["Technical depth", "Problem solving"],
        "Core technical ability and problem-solving depth are validated here.",
    ),
    (
        "Round 3: Project Deep Dive",
        &["Projects", "Execution"],
        "Interviewers test practical delivery quality through your previous work.",
    ),
    (
        "Round 4: Managerial / HR",
        &["Role fit", "Decision confidence"],
        "Final conversation checks fit, expectations, and decision confidence.",
    ),
];

impl RoundTemplate {
    pub fn rounds(self) -> Vec<RoundInfo> {
        let source = match self {
            RoundTemplate::EnterpriseDsa => ENTERPRISE_ROUNDS,
            RoundTemplate::StartupWeb => STARTUP_ROUNDS,
            RoundTemplate::Generic => GENERIC_ROUNDS,
        };
        source
            .iter()
            .map(|(title, focus, why)| RoundInfo {
                round_title: title.to_string(),
                focus_areas: focus.iter().map(|f| f.to_string()).collect(),
                why_it_matters: why.to_string(),
            })
            .collect()
    }
}

/// Selection policy, first match wins:
/// 1. enterprise with DSA detected
/// 2. non-enterprise with React or Node.js detected
/// 3. everything else
pub fn select_round_template(skills: &ExtractedSkills, intel: &CompanyIntel) -> RoundTemplate {
    let has_dsa = skills.contains(SkillCategory::CoreCs, "DSA");
    let has_web_stack = skills.contains(SkillCategory::Web, "React")
        || skills.contains(SkillCategory::Web, "Node.js");
    let is_enterprise = intel.size_category == SizeCategory::Enterprise;

    if is_enterprise && has_dsa {
        RoundTemplate::EnterpriseDsa
    } else if !is_enterprise && has_web_stack {
        RoundTemplate::StartupWeb
    } else {
        RoundTemplate::Generic
    }
}

pub fn generate_round_mapping(skills: &ExtractedSkills, intel: &CompanyIntel) -> Vec<RoundInfo> {
    select_round_template(skills, intel).rounds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::company::generate_company_intel;
    use crate::analysis::skills::extract_skills;

    fn template_for(company: &str, jd: &str) -> RoundTemplate {
        let skills = extract_skills(jd);
        let intel = generate_company_intel(company, jd);
        select_round_template(&skills, &intel)
    }

    #[test]
    fn test_enterprise_with_dsa_gets_four_round_enterprise_template() {
        assert_eq!(
            template_for("Amazon", "DSA, React, Node.js"),
            RoundTemplate::EnterpriseDsa
        );
        let rounds = RoundTemplate::EnterpriseDsa.rounds();
        assert_eq!(rounds.len(), 4);
        assert_eq!(rounds[0].round_title, "Round 1: Online Test (DSA + Aptitude)");
        assert_eq!(rounds[3].round_title, "Round 4: HR");
    }

    #[test]
    fn test_startup_with_web_stack_gets_three_rounds() {
        assert_eq!(
            template_for("BrightStartup", "React and Node.js"),
            RoundTemplate::StartupWeb
        );
        assert_eq!(template_for("", "Node.js"), RoundTemplate::StartupWeb);
        assert_eq!(RoundTemplate::StartupWeb.rounds().len(), 3);
    }

    #[test]
    fn test_enterprise_without_dsa_falls_back_to_generic() {
        assert_eq!(template_for("Microsoft", "React"), RoundTemplate::Generic);
    }

    #[test]
    fn test_startup_without_web_stack_is_generic() {
        assert_eq!(template_for("Tiny Co", "DSA and SQL"), RoundTemplate::Generic);
        let rounds = RoundTemplate::Generic.rounds();
        assert_eq!(rounds.len(), 4);
        assert_eq!(rounds[3].round_title, "Round 4: Managerial / HR");
    }

    #[test]
    fn test_every_round_has_focus_and_rationale() {
        for template in [
            RoundTemplate::EnterpriseDsa,
            RoundTemplate::StartupWeb,
            RoundTemplate::Generic,
        ] {
            for round in template.rounds() {
                assert_eq!(round.focus_areas.len(), 2);
                assert!(!round.why_it_matters.is_empty());
            }
        }
    }
}
