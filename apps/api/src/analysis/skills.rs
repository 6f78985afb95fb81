//! Skill Extractor: matches the static catalog against free JD text.
//!
//! Detection, not classification: every catalog pattern is tested independently and
//! all matches are kept, grouped under the category that owns the pattern.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::{SkillCategory, DEFAULT_OTHER_SKILLS, SKILL_CATALOG};

/// Skills detected in a JD, grouped by category. All seven categories are always
/// present; each list keeps catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedSkills {
    #[serde(rename = "coreCS")]
    pub core_cs: Vec<String>,
    pub languages: Vec<String>,
    pub web: Vec<String>,
    pub data: Vec<String>,
    pub cloud: Vec<String>,
    pub testing: Vec<String>,
    pub other: Vec<String>,
}

impl ExtractedSkills {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::CoreCs => &self.core_cs,
            SkillCategory::Languages => &self.languages,
            SkillCategory::Web => &self.web,
            SkillCategory::Data => &self.data,
            SkillCategory::Cloud => &self.cloud,
            SkillCategory::Testing => &self.testing,
            SkillCategory::Other => &self.other,
        }
    }

    pub fn get_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::CoreCs => &mut self.core_cs,
            SkillCategory::Languages => &mut self.languages,
            SkillCategory::Web => &mut self.web,
            SkillCategory::Data => &mut self.data,
            SkillCategory::Cloud => &mut self.cloud,
            SkillCategory::Testing => &mut self.testing,
            SkillCategory::Other => &mut self.other,
        }
    }

    pub fn contains(&self, category: SkillCategory, skill: &str) -> bool {
        self.get(category).iter().any(|s| s == skill)
    }

    pub fn has_any(&self, category: SkillCategory) -> bool {
        !self.get(category).is_empty()
    }

    /// Number of catalog-backed categories (everything except `other`) with a match.
    pub fn detected_category_count(&self) -> usize {
        SkillCategory::DETECTABLE
            .iter()
            .filter(|c| self.has_any(**c))
            .count()
    }

    /// True when the result is the "nothing detected" fallback.
    pub fn is_fallback(&self) -> bool {
        self.has_any(SkillCategory::Other)
    }

    /// All skills in category order, then catalog order within a category.
    pub fn all_skills(&self) -> impl Iterator<Item = &str> + '_ {
        SkillCategory::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).iter().map(String::as_str))
    }
}

/// Extracts catalog skills from the JD text. Empty text yields the fallback set.
pub fn extract_skills(jd_text: &str) -> ExtractedSkills {
    let mut skills = ExtractedSkills::default();

    for entry in SKILL_CATALOG.iter() {
        if entry.pattern.is_match(jd_text) {
            skills.get_mut(entry.category).push(entry.name.to_string());
        }
    }

    if skills.detected_category_count() == 0 {
        skills.other = DEFAULT_OTHER_SKILLS.iter().map(|s| s.to_string()).collect();
    }

    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_fallback() {
        let skills = extract_skills("");
        assert_eq!(
            skills.other,
            vec!["Communication", "Problem solving", "Basic coding", "Projects"]
        );
        assert_eq!(skills.detected_category_count(), 0);
        assert!(skills.is_fallback());
    }

    #[test]
    fn test_fallback_not_used_when_anything_matches() {
        let skills = extract_skills("We use Docker for deployments.");
        assert_eq!(skills.cloud, vec!["Docker"]);
        assert!(skills.other.is_empty());
    }

    #[test]
    fn test_multiple_categories_keep_catalog_order() {
        let skills = extract_skills(
            "Strong DSA and OOP. TypeScript, Python and Java. React + Node.js with PostgreSQL.",
        );
        assert_eq!(skills.core_cs, vec!["DSA", "OOP"]);
        assert_eq!(skills.languages, vec!["Java", "Python", "TypeScript"]);
        assert_eq!(skills.web, vec!["React", "Node.js"]);
        assert_eq!(skills.data, vec!["PostgreSQL"]);
        assert_eq!(skills.detected_category_count(), 4);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let skills = extract_skills("KUBERNETES and k8s, continuous integration");
        assert_eq!(skills.cloud, vec!["Kubernetes", "CI/CD"]);
    }

    #[test]
    fn test_c_family_languages_are_distinguished() {
        // A bare "C" also matches in front of "++" and "#".
        let skills = extract_skills("Experience in C++ and C# required.");
        assert_eq!(skills.languages, vec!["C", "C++", "C#"]);

        let skills = extract_skills("Experience in C# required.");
        assert!(skills.contains(SkillCategory::Languages, "C#"));
        assert!(!skills.contains(SkillCategory::Languages, "C++"));

        let skills = extract_skills("Embedded C, some Golang.");
        assert_eq!(skills.languages, vec!["C", "Go"]);
    }

    #[test]
    fn test_word_boundaries_avoid_partial_matches() {
        let skills = extract_skills("javascripting reactive ossified");
        assert!(skills.languages.is_empty());
        assert!(skills.web.is_empty());
        assert!(skills.core_cs.is_empty());
    }

    #[test]
    fn test_every_category_key_serialized() {
        let json = serde_json::to_value(extract_skills("SQL")).unwrap();
        let obj = json.as_object().unwrap();
        for category in SkillCategory::ALL {
            assert!(obj.contains_key(category.key()), "missing {}", category.key());
        }
    }

    #[test]
    fn test_all_skills_flattens_in_category_order() {
        let skills = extract_skills("Selenium, SQL, DSA");
        let all: Vec<&str> = skills.all_skills().collect();
        assert_eq!(all, vec!["DSA", "SQL", "Selenium"]);
    }
}
