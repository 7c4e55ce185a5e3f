use http::StatusCode;
use session_auth::{CoordinationError, SessionError};

/// Helper trait for converting errors to a standard response error format
pub(crate) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Only infrastructure failures reach this point; rejected logins and
/// registrations are redirects, not errors.
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            tracing::error!("Auth flow failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
    }
}

impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            tracing::error!("Session lookup failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
    }
}

/// Template rendering failures
impl<T> IntoResponseError<T> for Result<T, askama::Error> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_auth::{StorageError, UserError};

    #[test]
    fn test_coordination_error_is_internal() {
        let result: Result<(), CoordinationError> = Err(CoordinationError::UserError(
            UserError::Storage("unreachable".to_string()),
        ));

        let Err((status, message)) = result.into_response_error() else {
            panic!("Expected an error");
        };

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.contains("unreachable"));
    }

    #[test]
    fn test_session_error_is_internal() {
        let result: Result<(), SessionError> =
            Err(StorageError::Storage("down".to_string()).into());

        let Err((status, _)) = result.into_response_error() else {
            panic!("Expected an error");
        };

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_success_case() {
        let result: Result<String, CoordinationError> = Ok("Success".to_string());

        assert_eq!(result.into_response_error().unwrap(), "Success");
    }
}
