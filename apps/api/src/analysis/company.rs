//! Company Profiler: heuristic industry and size classification.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::catalog::ENTERPRISE_COMPANIES;

pub const INTEL_NOTE: &str = "Demo Mode: Company intel generated heuristically.";
pub const DEFAULT_INDUSTRY: &str = "Technology Services";

const ENTERPRISE_HIRING_FOCUS: &str = "Structured DSA screening with strong focus on core CS fundamentals and consistency under timed rounds.";
const STARTUP_HIRING_FOCUS: &str = "Practical problem solving with strong stack depth, product thinking, and implementation ownership.";

/// Estimated employer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCategory {
    #[serde(rename = "Enterprise (2000+)")]
    Enterprise,
    #[serde(rename = "Startup (<200)")]
    Startup,
}

impl SizeCategory {
    pub fn label(self) -> &'static str {
        match self {
            SizeCategory::Enterprise => "Enterprise (2000+)",
            SizeCategory::Startup => "Startup (<200)",
        }
    }

    pub fn hiring_focus(self) -> &'static str {
        match self {
            SizeCategory::Enterprise => ENTERPRISE_HIRING_FOCUS,
            SizeCategory::Startup => STARTUP_HIRING_FOCUS,
        }
    }
}

/// Heuristic employer profile derived during an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyIntel {
    #[serde(alias = "companyName")]
    pub company_name: String,
    pub industry: String,
    #[serde(alias = "sizeCategory")]
    pub size_category: SizeCategory,
    #[serde(alias = "typicalHiringFocus")]
    pub typical_hiring_focus: String,
    pub note: String,
}

lazy_static! {
    /// Industry keyword groups, first match wins.
    static ref INDUSTRY_RULES: Vec<(Regex, &'static str)> = [
        (r"\bfintech\b|bank|insurance|payments|nbfc", "Financial Services"),
        (r"\be-?commerce\b|retail|marketplace", "E-commerce"),
        (r"\bhealth\b|healthcare|medtech|hospital", "Healthcare Technology"),
        (r"\bedtech\b|education|learning", "EdTech"),
        (r"\bsaas\b|software|platform|cloud", "Software / SaaS"),
    ]
    .into_iter()
    .map(|(pattern, label)| {
        (
            Regex::new(pattern).expect("static industry pattern must compile"),
            label,
        )
    })
    .collect();
}

/// Infers an industry label from the company name and JD text.
pub fn infer_industry(company: &str, jd_text: &str) -> &'static str {
    let haystack = format!("{company} {jd_text}").to_lowercase();
    INDUSTRY_RULES
        .iter()
        .find(|(re, _)| re.is_match(&haystack))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_INDUSTRY)
}

/// Infers employer size from the company name alone. Blank names are startups.
pub fn infer_size_category(company: &str) -> SizeCategory {
    let normalized = company.trim().to_lowercase();
    if normalized.is_empty() {
        return SizeCategory::Startup;
    }
    if ENTERPRISE_COMPANIES
        .iter()
        .any(|name| normalized.contains(name))
    {
        SizeCategory::Enterprise
    } else {
        SizeCategory::Startup
    }
}

pub fn generate_company_intel(company: &str, jd_text: &str) -> CompanyIntel {
    let size_category = infer_size_category(company);
    CompanyIntel {
        company_name: if company.is_empty() {
            "Not provided".to_string()
        } else {
            company.to_string()
        },
        industry: infer_industry(company, jd_text).to_string(),
        size_category,
        typical_hiring_focus: size_category.hiring_focus().to_string(),
        note: INTEL_NOTE.to_string(),
    }
}
