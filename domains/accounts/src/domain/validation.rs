//! Validation helpers and constants for API handlers

use validator::ValidationError;

/// Longest display name an account may carry
pub const MAX_NAME_LEN: u64 = 30;

/// Matches the `profile_image` column width
pub const MAX_PROFILE_IMAGE_LEN: u64 = 1024;

/// Reject strings that are empty or only whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
