//! Problem editor draft model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::problem::{Difficulty, ProblemExample, TestCase};

/// Autosaved snapshot of in-progress problem editor state
///
/// One global storage slot holds at most one draft. `problem_id` binds the
/// draft to an existing problem; `None` marks a new-problem draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDraft {
    #[serde(default)]
    pub problem_id: Option<u64>,
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
    pub saved_at: DateTime<Utc>,
}

impl ProblemDraft {
    /// Whether this draft belongs to the given editor target (an existing
    /// problem id, or `None` for a new-problem session)
    pub fn targets(&self, target: Option<u64>) -> bool {
        self.problem_id == target
    }
}
