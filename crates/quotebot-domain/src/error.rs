//! Domain errors

use std::fmt;

/// A field needed for premium arithmetic was not extracted
///
/// Raised instead of coercing the "Not found" marker into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingRequiredFieldError {
    /// Name of the missing field
    pub field: &'static str,
}

impl MissingRequiredFieldError {
    /// Create an error for the named field
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl fmt::Display for MissingRequiredFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "required field '{}' was not found in the document", self.field)
    }
}

impl std::error::Error for MissingRequiredFieldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_field() {
        let err = MissingRequiredFieldError::new("indemnity_amount");
        assert_eq!(
            err.to_string(),
            "required field 'indemnity_amount' was not found in the document"
        );
    }
}
