//! Problem model

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::constants::{MAX_PROBLEM_DESCRIPTION_LENGTH, MAX_PROBLEM_TITLE_LENGTH};

/// Problem record
///
/// Ids are numeric and caller-assignable; the wire format is lenient and
/// accepts both `5` and `"5"` for the same record (legacy clients stringify
/// ids in path parameters and stored blobs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(deserialize_with = "lenient_id")]
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<ProblemExample>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub starter_code: BTreeMap<String, String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// Sample input/output pair shown with a problem statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemExample {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Test case attached to a problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: u64,
    pub input: String,
    pub expected: String,
}

/// Problem difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Create problem request
///
/// `id` is optional and only meaningful on the fallback path, which honors
/// it and otherwise assigns `max(existing) + 1`; the remote path never
/// forwards it, the server arbitrates its own ids.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProblemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    pub difficulty: Difficulty,

    /// Free-form category key, e.g. "sequence-analysis"
    pub category: String,

    #[validate(length(max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    pub description: String,

    #[serde(default)]
    pub examples: Vec<ProblemExample>,

    #[serde(default)]
    pub constraints: Vec<String>,

    #[serde(default)]
    pub starter_code: BTreeMap<String, String>,

    #[serde(default)]
    pub hints: Vec<String>,

    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl CreateProblemRequest {
    /// Materialize the request into a stored record under the given id
    pub fn into_problem(self, id: u64) -> Problem {
        Problem {
            id,
            slug: slugify(&self.title),
            title: self.title,
            difficulty: self.difficulty,
            category: self.category,
            description: self.description,
            examples: self.examples,
            constraints: self.constraints,
            starter_code: self.starter_code,
            hints: self.hints,
            test_cases: self.test_cases,
        }
    }
}

/// Derive a URL slug from a problem title (not guaranteed unique)
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_dash = true;

    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// Accept a numeric id encoded either as a JSON number or a string
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid record id: {:?}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Reverse Complement"), "reverse-complement");
        assert_eq!(slugify("GC Content (v2)"), "gc-content-v2");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_lenient_id_accepts_string_and_number() {
        let from_number: Problem = serde_json::from_value(serde_json::json!({
            "id": 5,
            "slug": "x",
            "title": "x",
            "difficulty": "easy",
            "category": "c",
            "description": "d"
        }))
        .unwrap();

        let from_string: Problem = serde_json::from_value(serde_json::json!({
            "id": "5",
            "slug": "x",
            "title": "x",
            "difficulty": "easy",
            "category": "c",
            "description": "d"
        }))
        .unwrap();

        assert_eq!(from_number.id, 5);
        assert_eq!(from_string.id, from_number.id);
    }

    #[test]
    fn test_lenient_id_rejects_garbage() {
        let result: Result<Problem, _> = serde_json::from_value(serde_json::json!({
            "id": "five",
            "slug": "x",
            "title": "x",
            "difficulty": "easy",
            "category": "c",
            "description": "d"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_into_problem_derives_slug() {
        let request = CreateProblemRequest {
            id: None,
            title: "Point Mutations".to_string(),
            difficulty: Difficulty::Easy,
            category: "sequence-comparison".to_string(),
            description: "Count mismatches".to_string(),
            examples: Vec::new(),
            constraints: Vec::new(),
            starter_code: BTreeMap::new(),
            hints: Vec::new(),
            test_cases: Vec::new(),
        };

        let problem = request.into_problem(9);
        assert_eq!(problem.id, 9);
        assert_eq!(problem.slug, "point-mutations");
    }
}
