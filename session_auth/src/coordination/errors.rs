use thiserror::Error;

use crate::session::SessionError;
use crate::userdb::UserError;

/// Infrastructure failures surfaced by the auth flow
///
/// Rejected credentials, duplicate emails and missing fields are not errors;
/// they are reported as redirects in [`AuthOutcome`](super::AuthOutcome).
#[derive(Debug, Error, Clone)]
pub enum CoordinationError {
    /// Error from the session layer
    #[error("Session error: {0}")]
    SessionError(#[from] SessionError),

    /// Error from the user directory
    #[error("User error: {0}")]
    UserError(#[from] UserError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    #[test]
    fn test_from_user_error() {
        let err = CoordinationError::from(UserError::Storage("gone".to_string()));
        assert_eq!(err.to_string(), "User error: Storage error: gone");
    }

    #[test]
    fn test_from_session_error() {
        let err = CoordinationError::from(SessionError::from(StorageError::Storage(
            "down".to_string(),
        )));
        assert!(matches!(err, CoordinationError::SessionError(_)));
        assert_eq!(err.to_string(), "Session error: Storage error: Storage error: down");
    }
}
