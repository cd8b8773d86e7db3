//! Input validation for corkboard signup fields.

use thiserror::Error;

/// Minimum login id length.
pub const MIN_USER_ID_LENGTH: usize = 3;

/// Maximum login id length.
pub const MAX_USER_ID_LENGTH: usize = 20;

/// Minimum display name length.
pub const MIN_DISPLAY_NAME_LENGTH: usize = 2;

/// Maximum display name length.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Login id is too short.
    #[error("user id must be at least {MIN_USER_ID_LENGTH} characters")]
    UserIdTooShort,

    /// Login id is too long.
    #[error("user id must be at most {MAX_USER_ID_LENGTH} characters")]
    UserIdTooLong,

    /// Login id contains invalid characters.
    #[error("user id can only contain alphanumeric characters, underscores and hyphens")]
    UserIdInvalidChars,

    /// Login id is reserved.
    #[error("this user id is reserved")]
    UserIdReserved,

    /// Display name is too short.
    #[error("display name must be at least {MIN_DISPLAY_NAME_LENGTH} characters")]
    DisplayNameTooShort,

    /// Display name is too long.
    #[error("display name must be at most {MAX_DISPLAY_NAME_LENGTH} characters")]
    DisplayNameTooLong,

    /// Display name contains control characters.
    #[error("display name contains invalid characters")]
    DisplayNameInvalidChars,
}

/// Reserved login ids that cannot be registered.
const RESERVED_USER_IDS: &[&str] = &[
    "admin",
    "administrator",
    "anonymous",
    "api",
    "corkboard",
    "help",
    "moderator",
    "root",
    "support",
    "system",
];

/// Check if a login id is reserved.
pub fn is_reserved_user_id(id: &str) -> bool {
    let lower = id.to_lowercase();
    RESERVED_USER_IDS.iter().any(|&r| r == lower)
}

/// Validate a login id.
///
/// Requirements:
/// - Length: 3-20 characters
/// - Characters: alphanumeric, underscore, hyphen
/// - Not a reserved id
///
/// # Examples
///
/// ```
/// use corkboard::auth::validation::validate_user_id;
///
/// assert!(validate_user_id("john_doe").is_ok());
/// assert!(validate_user_id("jd").is_err()); // too short
/// assert!(validate_user_id("admin").is_err()); // reserved
/// ```
pub fn validate_user_id(id: &str) -> Result<(), ValidationError> {
    let len = id.chars().count();
    if len < MIN_USER_ID_LENGTH {
        return Err(ValidationError::UserIdTooShort);
    }
    if len > MAX_USER_ID_LENGTH {
        return Err(ValidationError::UserIdTooLong);
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::UserIdInvalidChars);
    }
    if is_reserved_user_id(id) {
        return Err(ValidationError::UserIdReserved);
    }
    Ok(())
}

/// Validate a display name.
///
/// Requirements:
/// - Length: 2-50 characters after trimming
/// - No control characters
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len < MIN_DISPLAY_NAME_LENGTH {
        return Err(ValidationError::DisplayNameTooShort);
    }
    if len > MAX_DISPLAY_NAME_LENGTH {
        return Err(ValidationError::DisplayNameTooLong);
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::DisplayNameInvalidChars);
    }
    Ok(())
}
