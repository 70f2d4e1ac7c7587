//! Keyword fallback analyzer. Deterministic, offline, no LLM call.
//!
//! Algorithm:
//! 1. Run the catalog matcher over the resume and over the job description.
//! 2. missing = job skills absent from the resume, in catalog order.
//! 3. match_percentage = resume skill count / job skill count × 100, capped at 100,
//!    or 0 when the job description names no catalog skill.
//!
//! The ratio counts every resume skill, including ones the job never asks for.
//! It is a coarse compatibility score, kept as-is so results stay comparable
//! with earlier releases.

use crate::analysis::result::{AnalysisResult, MatchPercentage};
use crate::analysis::skills::find_skills;

pub const FALLBACK_SUGGESTIONS: [&str; 4] = [
    "Add the missing skills to your resume if you have them",
    "Tailor your experience section to highlight relevant experiences",
    "Use keywords from the job description in your resume",
    "Consider using a professional resume template",
];

/// Marks the result as coming from the keyword path so callers never mistake
/// it for a model analysis.
pub const FALLBACK_SUMMARY: &str =
    "This is an automated analysis. For better results, please set up your OpenAI API key.";

pub fn fallback_analyze(resume_text: &str, job_description: &str) -> AnalysisResult {
    let extracted_skills = find_skills(resume_text);
    let job_skills = find_skills(job_description);

    let missing_skills: Vec<String> = job_skills
        .iter()
        .filter(|skill| !extracted_skills.contains(skill))
        .cloned()
        .collect();

    let match_percentage = MatchPercentage::from_ratio(extracted_skills.len(), job_skills.len());

    AnalysisResult {
        extracted_skills,
        missing_skills,
        match_percentage,
        improvement_suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        summary: FALLBACK_SUMMARY.to_string(),
    }
}
