use std::fmt;

use crate::store::ValidationError;

/// Request-level failures surfaced by the user service handlers.
///
/// Each variant maps to exactly one HTTP status; handlers turn these into a
/// `{"success": false, "error": ...}` envelope instead of propagating them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Creation rejected by the store's validator.
    Validation(ValidationError),
    /// A path segment that must be an integer was not.
    InvalidIdentifier,
    /// The identifier is unknown.
    NotFound,
    /// The request body could not be interpreted.
    MalformedBody,
}

impl ServiceError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Validation(_)
            | ServiceError::InvalidIdentifier
            | ServiceError::MalformedBody => 400,
            ServiceError::NotFound => 404,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Validation(err) => write!(f, "{err}"),
            ServiceError::InvalidIdentifier => write!(f, "Invalid user ID"),
            ServiceError::NotFound => write!(f, "User not found"),
            ServiceError::MalformedBody => write!(f, "Invalid request body"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ServiceError::from(ValidationError::InvalidName).status(), 400);
        assert_eq!(ServiceError::InvalidIdentifier.status(), 400);
        assert_eq!(ServiceError::MalformedBody.status(), 400);
        assert_eq!(ServiceError::NotFound.status(), 404);
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = ServiceError::from(ValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "invalid email format");
    }
}
