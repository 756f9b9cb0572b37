//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum length of a first or last name
pub const NAME_MAX_LENGTH: usize = 100;

/// Minimum length of a first or last name (strict policy only)
pub const NAME_MIN_LENGTH: usize = 3;

/// Maximum length of an email address
pub const EMAIL_MAX_LENGTH: usize = 255;

/// Exact length of a phone number
pub const PHONE_NUMBER_LENGTH: usize = 9;

// =============================================================================
// Pagination
// =============================================================================

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_INDEX: u64 = 1;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;
