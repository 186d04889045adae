//! # Validation Utilities
//!
//! Input validation helpers. Messages follow the wording the chat front end displays.

/// Validate that a string is not empty or whitespace only.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("The {} field is required.", field_name))
    } else {
        Ok(())
    }
}

/// Validate maximum length, counted in characters rather than bytes.
pub fn validate_max_chars(value: &str, max: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!(
            "The {} field must not be greater than {} characters.",
            field_name, max
        ))
    } else {
        Ok(())
    }
}

// endregion: --- Tests
