//! Field rules shared by the entity and the HTTP request validator.
//!
//! Lengths are counted in UTF-16 code units, the unit JSON clients measure
//! strings in. Accented letters count once; characters outside the Basic
//! Multilingual Plane (most emoji) count twice.

use crate::error::ValidationError;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if utf16_len(title) > TITLE_MAX_LEN {
        return Err(ValidationError::TitleLength);
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if utf16_len(description) > DESCRIPTION_MAX_LEN {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}
