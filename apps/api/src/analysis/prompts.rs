// LLM prompt constants for resume analysis.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Analysis prompt template. Replace `{json_only}`, `{job_description}` and
/// `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"{json_only}

Please analyze this resume:

{resume_text}

Against this job description:

{job_description}

Return a JSON object with this EXACT schema (no extra fields):
{
  "extracted_skills": ["skills found in the resume"],
  "missing_skills": ["important skills in the job description missing from the resume"],
  "match_percentage": 75,
  "improvement_suggestions": ["specific suggestions to improve the resume"],
  "summary": "brief summary of the analysis"
}

Rules:
- "match_percentage" is an integer from 0 to 100.
- Every list contains plain strings only."#;

pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    // The job description goes in before the resume so resume text containing a
    // literal placeholder cannot pull the job description in twice.
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{job_description}", job_description)
        .replace("{resume_text}", resume_text)
}
