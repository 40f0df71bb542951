//! Input validation utilities

use crate::constants;

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if (password.len() as u64) < constants::MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }
    if (password.len() as u64) > constants::MAX_PASSWORD_LENGTH {
        return Err("Password must be at most 128 characters");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one number");
    }
    Ok(())
}

/// Validate programming language
pub fn validate_language(language: &str) -> Result<(), &'static str> {
    if constants::languages::ALL.contains(&language) {
        Ok(())
    } else {
        Err("Unsupported programming language")
    }
}

/// Validate submitted source code size
pub fn validate_source_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() {
        return Err("Source code cannot be empty");
    }
    if code.len() > constants::MAX_SOURCE_CODE_SIZE {
        return Err("Source code exceeds maximum size of 64KB");
    }
    Ok(())
}

/// Validate problem title
pub fn validate_problem_title(title: &str) -> Result<(), &'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Problem title cannot be empty");
    }
    if (trimmed.len() as u64) > constants::MAX_PROBLEM_TITLE_LENGTH {
        return Err("Problem title must be at most 256 characters");
    }
    Ok(())
}
