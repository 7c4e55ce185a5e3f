use axum::extract::FromRequestParts;
use http::{StatusCode, request::Parts};

use session_auth::SessionContext;

use super::error::IntoResponseError;
use super::state::AuthState;

/// The session attached to the current request, available as an Axum extractor
///
/// Reuses the context resolved by the gate middleware when one ran, otherwise
/// resolves it from the request's session cookie. Never rejects an anonymous
/// visitor; gating is the middleware's job.
///
/// # Example
///
/// ```no_run
/// use session_auth_axum::CurrentSession;
///
/// async fn greet(CurrentSession(session): CurrentSession) -> String {
///     match session.user_id() {
///         Some(id) => format!("Hello, user {id}!"),
///         None => "Hello, stranger!".to_string(),
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct CurrentSession(pub SessionContext);

impl FromRequestParts<AuthState> for CurrentSession {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AuthState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<SessionContext>() {
            return Ok(Self(session.clone()));
        }

        let session = state
            .sessions()
            .load(&parts.headers)
            .await
            .into_response_error()?;
        parts.extensions.insert(session.clone());
        Ok(Self(session))
    }
}
