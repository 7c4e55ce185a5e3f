use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use session_auth::{Gate, SessionContext};

use super::error::IntoResponseError;
use super::state::AuthState;

// Resolve the session, evaluate the gate, and either redirect or hand the
// request (with its session attached) to the handler.
async fn run_gate(
    state: &AuthState,
    mut req: Request,
    next: Next,
    gate: fn(&SessionContext) -> Gate,
) -> Response {
    let session = match state.sessions().load(req.headers()).await.into_response_error() {
        Ok(session) => session,
        Err(err) => return err.into_response(),
    };

    match gate(&session) {
        Gate::Redirect(target) => {
            tracing::debug!("Gate redirecting {} to {}", req.uri().path(), target);
            Redirect::to(target).into_response()
        }
        Gate::Proceed => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
    }
}

/// Middleware for protected pages: anonymous visitors are redirected to `/login`
pub async fn require_authenticated(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    run_gate(&state, req, next, session_auth::require_authenticated).await
}

/// Middleware for anonymous-only pages: signed-in visitors are redirected to `/home`
pub async fn require_anonymous(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    run_gate(&state, req, next, session_auth::require_anonymous).await
}
