//! Error types for todo validation.
//!
//! # Design
//! Each rule gets its own variant so callers can match on the failure while
//! the `Display` text stays the exact message shown to API clients. The
//! HTTP layer reports every variant under the single category
//! [`ValidationError::CATEGORY`].

use thiserror::Error;

/// A field value rejected by the todo rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The title is empty or contains only whitespace.
    #[error("Title is required")]
    TitleRequired,

    /// The title is longer than [`TITLE_MAX_LEN`](crate::validation::TITLE_MAX_LEN).
    #[error("Title must be between 1 and 200 characters")]
    TitleLength,

    /// The description is longer than
    /// [`DESCRIPTION_MAX_LEN`](crate::validation::DESCRIPTION_MAX_LEN).
    #[error("Description must not exceed 1000 characters")]
    DescriptionTooLong,
}

impl ValidationError {
    pub const CATEGORY: &'static str = "Validation Error";
}
