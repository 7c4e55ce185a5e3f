use axum::{
    extract::{Form, State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, header::SET_COOKIE};

use session_auth::{AuthOutcome, LoginForm, RegisterForm, SessionChange, SessionError};

use super::error::IntoResponseError;
use super::pages::{HomeTemplate, IndexTemplate, LoginTemplate, RegisterTemplate, render};
use super::session::CurrentSession;
use super::state::AuthState;

/// Landing page with links depending on whether the visitor is signed in
pub(super) async fn index(CurrentSession(session): CurrentSession) -> Response {
    tracing::debug!(
        "Index visited by user {:?}",
        session.user_id().map(|id| id.get())
    );
    render(IndexTemplate::new(session.is_authenticated()))
}

pub(super) async fn home() -> Response {
    render(HomeTemplate::default())
}

pub(super) async fn login_page() -> Response {
    render(LoginTemplate::default())
}

pub(super) async fn register_page() -> Response {
    render(RegisterTemplate::default())
}

// A missing or unreadable body counts as a form with every field absent.
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!("Treating unreadable form as empty: {}", rejection);
            T::default()
        }
    }
}

pub(super) async fn login(
    State(state): State<AuthState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let outcome = state.flow.login(form_or_default(form)).await;
    match outcome.into_response_error() {
        Ok(outcome) => outcome_response(&state, outcome),
        Err(err) => err.into_response(),
    }
}

pub(super) async fn register(
    State(state): State<AuthState>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Response {
    let outcome = state.flow.register(form_or_default(form)).await;
    match outcome.into_response_error() {
        Ok(outcome) => outcome_response(&state, outcome),
        Err(err) => err.into_response(),
    }
}

// Resolves the session itself so that an unreadable store still redirects.
pub(super) async fn logout(State(state): State<AuthState>, headers: HeaderMap) -> Response {
    let outcome = state.flow.logout_from_headers(&headers).await;
    outcome_response(&state, outcome)
}

/// Turn a transition outcome into a redirect carrying the matching Set-Cookie header
fn outcome_response(state: &AuthState, outcome: AuthOutcome) -> Response {
    let sessions = state.sessions();
    let cookie = match &outcome.session {
        SessionChange::Unchanged => Ok(None),
        SessionChange::Established { cookie, .. } => sessions.session_cookie(cookie).map(Some),
        SessionChange::Destroyed => sessions.clear_cookie().map(Some),
    };

    let cookie: Result<Option<_>, SessionError> = cookie;
    match cookie.into_response_error() {
        Ok(cookie) => {
            let mut headers = HeaderMap::new();
            if let Some(cookie) = cookie {
                headers.insert(SET_COOKIE, cookie);
            }
            (headers, Redirect::to(outcome.redirect_to)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
