//! Question Selector: up to ten unique interview questions.

use crate::analysis::catalog::{question_for, FALLBACK_QUESTION_SKILLS, GENERIC_QUESTIONS};
use crate::analysis::skills::ExtractedSkills;

pub const MAX_QUESTIONS: usize = 10;

/// Skill-matched questions first (catalog order), then the fixed fallback sequence.
/// Never more than [`MAX_QUESTIONS`], never duplicate text.
pub fn select_questions(skills: &ExtractedSkills) -> Vec<String> {
    let mut questions: Vec<String> = Vec::with_capacity(MAX_QUESTIONS);

    for skill in skills.all_skills() {
        if let Some(question) = question_for(skill) {
            push_unique(&mut questions, question);
        }
    }

    let fallback = FALLBACK_QUESTION_SKILLS
        .iter()
        .filter_map(|skill| question_for(skill))
        .chain(GENERIC_QUESTIONS.iter().copied());
    for question in fallback {
        push_unique(&mut questions, question);
    }

    questions
}

fn push_unique(questions: &mut Vec<String>, question: &str) {
    if questions.len() < MAX_QUESTIONS && !questions.iter().any(|q| q == question) {
        questions.push(question.to_string());
    }
}
