//! Plain-text export of a saved analysis.

use serde::Deserialize;

use crate::analysis::catalog::SkillCategory;
use crate::models::history::HistoryEntry;

/// Which part of an entry to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSection {
    #[default]
    All,
    Plan,
    Checklist,
    Questions,
}

pub fn export_filename(entry: &HistoryEntry) -> String {
    format!("analysis-{}.txt", entry.id)
}

pub fn render_export(entry: &HistoryEntry, section: ExportSection) -> String {
    match section {
        ExportSection::Plan => plan_text(entry),
        ExportSection::Checklist => checklist_text(entry),
        ExportSection::Questions => questions_text(entry),
        ExportSection::All => full_text(entry),
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn plan_text(entry: &HistoryEntry) -> String {
    entry
        .plan_7_days
        .iter()
        .map(|day| format!("{}: {}\n{}", day.day, day.focus, bullets(&day.tasks)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn checklist_text(entry: &HistoryEntry) -> String {
    entry
        .checklist
        .iter()
        .map(|round| format!("{}\n{}", round.round_title, bullets(&round.items)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn questions_text(entry: &HistoryEntry) -> String {
    entry
        .questions
        .iter()
        .enumerate()
        .map(|(idx, question)| format!("{}. {question}", idx + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn full_text(entry: &HistoryEntry) -> String {
    let company = if entry.company.is_empty() { "Company not set" } else { &entry.company };
    let role = if entry.role.is_empty() { "Role not set" } else { &entry.role };
    let intel = &entry.company_intel;

    let mut lines: Vec<String> = vec![
        "Placement Readiness Analysis".to_string(),
        format!("{company} | {role} | Score {}/100", entry.final_score),
        String::new(),
        "Key Skills Extracted".to_string(),
    ];

    lines.extend(SkillCategory::ALL.iter().map(|category| {
        format!(
            "{}: {}",
            category.label(),
            entry.extracted_skills.get(*category).join(", ")
        )
    }));

    lines.extend([
        String::new(),
        "Company Intel".to_string(),
        format!("Company: {}", intel.company_name),
        format!("Industry: {}", intel.industry),
        format!("Estimated Size: {}", intel.size_category.label()),
        format!("Typical Hiring Focus: {}", intel.typical_hiring_focus),
        intel.note.clone(),
        String::new(),
        "Round Mapping".to_string(),
    ]);

    lines.extend(entry.round_mapping.iter().map(|round| {
        format!(
            "{}\nFocus Areas: {}\nWhy this round matters: {}",
            round.round_title,
            round.focus_areas.join(", "),
            round.why_it_matters
        )
    }));

    lines.extend([
        String::new(),
        "Round-wise Preparation Checklist".to_string(),
        checklist_text(entry),
        String::new(),
        "7-Day Plan".to_string(),
        plan_text(entry),
        String::new(),
        "10 Likely Interview Questions".to_string(),
        questions_text(entry),
    ]);

    lines.join("\n")
}
