//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// API DEFAULTS
// =============================================================================

/// Default base URL of the BioCode REST API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api";

/// Timeout for the one-shot availability probe (milliseconds)
pub const HEALTH_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Timeout for regular API requests (milliseconds)
pub const REQUEST_TIMEOUT_MS: u64 = 5_000;

// =============================================================================
// LOCAL STORE
// =============================================================================

/// Default directory for the local persistent store
pub const DEFAULT_DATA_DIR: &str = "./biocode-data";

/// Storage slot keys of the local persistent store
pub mod storage_keys {
    pub const PROBLEMS: &str = "problems";
    pub const SUBMISSIONS: &str = "submissions";
    pub const USERS: &str = "users";

    /// Current-session profile
    pub const SESSION: &str = "user";

    /// Single global draft slot of the problem editor
    pub const EDITOR_DRAFT: &str = "problem-editor-draft";
}

// =============================================================================
// PROBLEM SETTINGS
// =============================================================================

/// Problem difficulty identifiers
pub mod difficulties {
    pub const EASY: &str = "easy";
    pub const MEDIUM: &str = "medium";
    pub const HARD: &str = "hard";

    /// All supported difficulties
    pub const ALL: &[&str] = &[EASY, MEDIUM, HARD];
}

/// Languages with starter code and submission support
pub mod languages {
    pub const PYTHON: &str = "python";
    pub const JAVASCRIPT: &str = "javascript";
    pub const RUST: &str = "rust";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[PYTHON, JAVASCRIPT, RUST];
}

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Submission status identifiers
pub mod statuses {
    pub const ACCEPTED: &str = "accepted";
    pub const WRONG_ANSWER: &str = "wrong_answer";
    pub const TIME_LIMIT_EXCEEDED: &str = "time_limit_exceeded";
    pub const RUNTIME_ERROR: &str = "runtime_error";
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum problem description length
pub const MAX_PROBLEM_DESCRIPTION_LENGTH: u64 = 65535;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Minimum display name length
pub const MIN_NAME_LENGTH: u64 = 2;

/// Maximum display name length
pub const MAX_NAME_LENGTH: u64 = 64;

/// Maximum submitted source code size in bytes (64 KB)
pub const MAX_SOURCE_CODE_SIZE: usize = 64 * 1024;
