//! The analysis result contract shared by the model-backed and fallback paths,
//! plus the validating parser for untrusted model replies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::strip_json_fences;

/// A resume/job match score, guaranteed to lie in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MatchPercentage(u8);

impl MatchPercentage {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// `round(matched / total * 100)` capped at 100; `0` when `total` is zero.
    ///
    /// Halves round to even, so 12.5 scores 12 and 37.5 scores 38.
    pub fn from_ratio(matched: usize, total: usize) -> Self {
        if total == 0 {
            return Self(0);
        }
        let percent = (matched as f64 / total as f64 * 100.0).round_ties_even();
        Self(percent.min(f64::from(Self::MAX)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Canonical output of every analysis. Serialized as-is in the HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub extracted_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_percentage: MatchPercentage,
    pub improvement_suggestions: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Error)]
pub enum ResultParseError {
    #[error("reply contains no JSON object")]
    NoJsonObject,

    #[error("reply is not a valid analysis object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("match_percentage {0} is not a number between 0 and 100")]
    InvalidPercentage(String),
}

/// Shape the model is asked to return. `match_percentage` is loosely typed
/// because models answer `85`, `85.0` and `"85%"` interchangeably.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    extracted_skills: Vec<String>,
    missing_skills: Vec<String>,
    match_percentage: Value,
    improvement_suggestions: Vec<String>,
    summary: String,
}

/// Parses a model reply into an `AnalysisResult`, rejecting anything that does
/// not carry all five fields with a valid score. Unknown fields are ignored.
pub fn parse_model_reply(reply: &str) -> Result<AnalysisResult, ResultParseError> {
    let json = isolate_json_object(strip_json_fences(reply)).ok_or(ResultParseError::NoJsonObject)?;
    let raw: RawAnalysis = serde_json::from_str(json)?;

    Ok(AnalysisResult {
        extracted_skills: raw.extracted_skills,
        missing_skills: raw.missing_skills,
        match_percentage: parse_percentage(&raw.match_percentage)?,
        improvement_suggestions: raw.improvement_suggestions,
        summary: raw.summary,
    })
}

/// Slices from the first `{` to the last `}` so stray prose around the object is dropped.
fn isolate_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_percentage(value: &Value) -> Result<MatchPercentage, ResultParseError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim_end().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite() && (0.0..=f64::from(MatchPercentage::MAX)).contains(n))
        .and_then(|n| MatchPercentage::new(n.round() as u8))
        .ok_or_else(|| ResultParseError::InvalidPercentage(value.to_string()))
}
