//! Static lookup tables for the analysis pipeline: the skill recognition catalog,
//! the interview question bank and the enterprise employer list.
//!
//! Everything here is immutable and compiled once on first use.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Skill grouping. Serialized names are the stable keys of the extracted-skills object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "coreCS")]
    CoreCs,
    #[serde(rename = "languages")]
    Languages,
    #[serde(rename = "web")]
    Web,
    #[serde(rename = "data")]
    Data,
    #[serde(rename = "cloud")]
    Cloud,
    #[serde(rename = "testing")]
    Testing,
    #[serde(rename = "other")]
    Other,
}

impl SkillCategory {
    /// Every category, in output order.
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::CoreCs,
        SkillCategory::Languages,
        SkillCategory::Web,
        SkillCategory::Data,
        SkillCategory::Cloud,
        SkillCategory::Testing,
        SkillCategory::Other,
    ];

    /// Categories backed by catalog patterns. `Other` only ever holds the fallback list.
    pub const DETECTABLE: [SkillCategory; 6] = [
        SkillCategory::CoreCs,
        SkillCategory::Languages,
        SkillCategory::Web,
        SkillCategory::Data,
        SkillCategory::Cloud,
        SkillCategory::Testing,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SkillCategory::CoreCs => "coreCS",
            SkillCategory::Languages => "languages",
            SkillCategory::Web => "web",
            SkillCategory::Data => "data",
            SkillCategory::Cloud => "cloud",
            SkillCategory::Testing => "testing",
            SkillCategory::Other => "other",
        }
    }

    /// Human-readable label used in exports.
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::CoreCs => "Core CS",
            SkillCategory::Languages => "Languages",
            SkillCategory::Web => "Web",
            SkillCategory::Data => "Data",
            SkillCategory::Cloud => "Cloud/DevOps",
            SkillCategory::Testing => "Testing",
            SkillCategory::Other => "Other",
        }
    }
}

/// One recognisable skill: its category, display name and case-insensitive pattern.
#[derive(Debug)]
pub struct SkillPattern {
    pub category: SkillCategory,
    pub name: &'static str,
    pub pattern: Regex,
}

const CATALOG_SOURCE: &[(SkillCategory, &str, &str)] = &[
    (SkillCategory::CoreCs, "DSA", r"\bdsa\b"),
    (SkillCategory::CoreCs, "OOP", r"\boop\b|object[\s-]?oriented"),
    (SkillCategory::CoreCs, "DBMS", r"\bdbms\b"),
    (SkillCategory::CoreCs, "OS", r"\bos\b|operating system"),
    (SkillCategory::CoreCs, "Networks", r"\bnetworks?\b|computer networks?"),
    (SkillCategory::Languages, "Java", r"\bjava\b"),
    (SkillCategory::Languages, "Python", r"\bpython\b"),
    (SkillCategory::Languages, "JavaScript", r"\bjavascript\b"),
    (SkillCategory::Languages, "TypeScript", r"\btypescript\b"),
    (SkillCategory::Languages, "C", r"(^|[^a-z0-9])c([^a-z0-9]|$)"),
    (SkillCategory::Languages, "C++", r"(^|[^a-z0-9])c\+\+([^a-z0-9]|$)"),
    (SkillCategory::Languages, "C#", r"(^|[^a-z0-9])c#([^a-z0-9]|$)"),
    (SkillCategory::Languages, "Go", r"\bgo(lang)?\b"),
    (SkillCategory::Web, "React", r"\breact\b"),
    (SkillCategory::Web, "Next.js", r"\bnext\.?js\b"),
    (SkillCategory::Web, "Node.js", r"\bnode\.?js\b"),
    (SkillCategory::Web, "Express", r"\bexpress\b"),
    (SkillCategory::Web, "REST", r"\brest\b|restful"),
    (SkillCategory::Web, "GraphQL", r"\bgraphql\b"),
    (SkillCategory::Data, "SQL", r"\bsql\b"),
    (SkillCategory::Data, "MongoDB", r"\bmongodb\b"),
    (SkillCategory::Data, "PostgreSQL", r"\bpostgres(ql)?\b"),
    (SkillCategory::Data, "MySQL", r"\bmysql\b"),
    (SkillCategory::Data, "Redis", r"\bredis\b"),
    (SkillCategory::Cloud, "AWS", r"\baws\b|amazon web services"),
    (SkillCategory::Cloud, "Azure", r"\bazure\b"),
    (SkillCategory::Cloud, "GCP", r"\bgcp\b|google cloud"),
    (SkillCategory::Cloud, "Docker", r"\bdocker\b"),
    (SkillCategory::Cloud, "Kubernetes", r"\bkubernetes\b|\bk8s\b"),
    (
        SkillCategory::Cloud,
        "CI/CD",
        r"\bci/cd\b|continuous integration|continuous delivery",
    ),
    (SkillCategory::Cloud, "Linux", r"\blinux\b"),
    (SkillCategory::Testing, "Selenium", r"\bselenium\b"),
    (SkillCategory::Testing, "Cypress", r"\bcypress\b"),
    (SkillCategory::Testing, "Playwright", r"\bplaywright\b"),
    (SkillCategory::Testing, "JUnit", r"\bjunit\b"),
    (SkillCategory::Testing, "PyTest", r"\bpytest\b"),
];

lazy_static! {
    /// Compiled skill catalog, in catalog order.
    pub static ref SKILL_CATALOG: Vec<SkillPattern> = CATALOG_SOURCE
        .iter()
        .map(|(category, name, pattern)| SkillPattern {
            category: *category,
            name: *name,
            pattern: Regex::new(&format!("(?i){pattern}"))
                .expect("static skill pattern must compile"),
        })
        .collect();
}

/// Substituted into `other` when no catalog pattern matches.
pub const DEFAULT_OTHER_SKILLS: &[&str] =
    &["Communication", "Problem solving", "Basic coding", "Projects"];

/// One question per skill that has a bank entry.
pub const QUESTION_BANK: &[(&str, &str)] = &[
    ("DSA", "How would you optimize search in sorted data, and when is binary search not enough?"),
    ("OOP", "How do abstraction and polymorphism improve maintainability in a production codebase?"),
    ("DBMS", "What trade-offs do you consider when choosing normalization vs denormalization?"),
    ("OS", "What happens during a context switch and why can it become a bottleneck?"),
    ("Networks", "How do DNS lookup, TLS handshake, and HTTP request flow together end-to-end?"),
    ("Java", "How does the JVM memory model affect garbage collection tuning for backend services?"),
    ("Python", "When would you prefer list comprehension over generator expressions in performance-sensitive code?"),
    ("JavaScript", "How do closures and the event loop interact in asynchronous JavaScript execution?"),
    ("TypeScript", "How do union types and type guards help prevent runtime bugs in large frontend apps?"),
    ("C", "How do pointers and manual memory management impact reliability in systems programming?"),
    ("C++", "When would you use move semantics to reduce overhead in a C++ service?"),
    ("C#", "How do async/await patterns in C# affect thread utilization in web APIs?"),
    ("Go", "Why are goroutines lightweight, and how do channels help avoid shared-state bugs?"),
    ("React", "Explain state management options in React and how you choose between them."),
    ("Next.js", "How do SSR, SSG, and client rendering differ in Next.js for performance and SEO?"),
    ("Node.js", "How does Node.js handle high concurrency with a single-threaded event loop?"),
    ("Express", "How would you structure Express middleware for validation, auth, and error handling?"),
    ("REST", "What makes a REST API predictable and easy for clients to integrate?"),
    ("GraphQL", "How do you prevent over-fetching and resolver-level performance issues in GraphQL APIs?"),
    ("SQL", "Explain indexing and when it helps."),
    ("MongoDB", "How do you model relationships in MongoDB without creating expensive queries?"),
    ("PostgreSQL", "What PostgreSQL features would you use for transactional integrity and query performance?"),
    ("MySQL", "How do query plans help diagnose slow MySQL endpoints?"),
    ("Redis", "When would you use Redis as a cache vs as a primary data structure store?"),
    ("AWS", "Which AWS services would you pick for a scalable app backend and why?"),
    ("Azure", "How would you design deployment and monitoring workflow on Azure?"),
    ("GCP", "How do you choose between managed GCP services and self-managed infrastructure?"),
    ("Docker", "How do multi-stage Docker builds reduce image size and improve security?"),
    ("Kubernetes", "How do readiness and liveness probes prevent production downtime?"),
    ("CI/CD", "What checks should be mandatory in CI/CD before deployment to production?"),
    ("Linux", "Which Linux commands and diagnostics do you use first when a service is degraded?"),
    ("Selenium", "When is Selenium still preferred over modern browser automation frameworks?"),
    ("Cypress", "How do you make Cypress tests stable in a flaky UI environment?"),
    ("Playwright", "How do Playwright fixtures improve test isolation and speed?"),
    ("JUnit", "How do you structure JUnit tests to balance speed, coverage, and readability?"),
    ("PyTest", "How do pytest fixtures help manage integration test setup cleanly?"),
];

/// Skills whose bank questions pad the list, in padding order.
pub const FALLBACK_QUESTION_SKILLS: &[&str] =
    &["DSA", "OOP", "DBMS", "React", "SQL", "Node.js", "CI/CD"];

/// Generic questions appended after the skill-keyed fallbacks.
pub const GENERIC_QUESTIONS: &[&str] = &[
    "How do you prioritize bugs when multiple production issues occur at the same time?",
    "Describe a project failure and what exact change you made after that experience.",
    "How would you onboard quickly into an unfamiliar codebase in your first two weeks?",
];

/// Lowercase name fragments that mark an employer as enterprise-sized.
pub const ENTERPRISE_COMPANIES: &[&str] = &[
    "amazon",
    "infosys",
    "tcs",
    "wipro",
    "accenture",
    "cognizant",
    "microsoft",
    "google",
    "meta",
    "ibm",
    "oracle",
];

/// Looks up the bank question for a skill name.
pub fn question_for(skill: &str) -> Option<&'static str> {
    QUESTION_BANK
        .iter()
        .find(|(name, _)| *name == skill)
        .map(|(_, question)| *question)
}
