//! Skill catalog and whole-phrase keyword matcher used by the fallback analyzer.
//!
//! Matching is exact membership: a phrase counts when it appears with no word
//! character directly before or after it. There is no stemming and no fuzzy
//! credit ("postgres" does not match "postgresql"); that precision limit is
//! accepted for the offline path.

use std::sync::LazyLock;

use regex::Regex;

/// Known skills, lowercase, in reporting order.
pub const SKILL_CATALOG: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "java",
    "c++",
    "c#",
    "react",
    "angular",
    "vue",
    "node",
    "express",
    "flask",
    "django",
    "spring",
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "nosql",
    "rest api",
    "graphql",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "ci/cd",
    "jenkins",
    "github actions",
    "git",
    "agile",
    "scrum",
    "machine learning",
    "data analysis",
    "data science",
    "tensorflow",
    "pytorch",
    "nlp",
    "computer vision",
    "html",
    "css",
    "sass",
    "less",
    "bootstrap",
    "tailwind",
    "responsive design",
    "mobile development",
    "react native",
    "flutter",
    "swift",
    "kotlin",
    "android",
    "ios",
    "devops",
    "sre",
    "testing",
    "test automation",
    "junit",
    "selenium",
    "project management",
    "leadership",
    "communication",
    "problem solving",
];

static SKILL_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SKILL_CATALOG
        .iter()
        .map(|&phrase| (phrase, phrase_pattern(phrase)))
        .collect()
});

/// Compiles a catalog phrase as a literal bounded by non-word characters or
/// the text edges. A bare `\b` would reject `c++` followed by a space, since
/// there is no word boundary between `+` and ` `.
fn phrase_pattern(phrase: &str) -> Regex {
    Regex::new(&format!(r"(?:^|\W){}(?:\W|$)", regex::escape(phrase)))
        .expect("escaped catalog phrase is a valid pattern")
}

/// Returns the catalog phrases present in `text`, in catalog order, each at most once.
pub fn find_skills(text: &str) -> Vec<String> {
    let text = text.to_lowercase();

    SKILL_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&text))
        .map(|(phrase, _)| phrase.to_string())
        .collect()
}
