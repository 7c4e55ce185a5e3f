//! Router wiring the session pages, forms and access gates together

use axum::{Router, middleware::from_fn_with_state, routing::get, routing::post};
use http::header::{COOKIE, SET_COOKIE};
use std::iter::once;
use tower_http::LatencyUnit;
use tower_http::sensitive_headers::{
    SetSensitiveRequestHeadersLayer, SetSensitiveResponseHeadersLayer,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use session_auth::{HOME_PATH, INDEX_PATH, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH};

use super::handlers::{home, index, login, login_page, logout, register, register_page};
use super::middleware::{require_anonymous, require_authenticated};
use super::state::AuthState;

/// Create the router for every session endpoint with HTTP request tracing
///
/// Session cookies are marked sensitive before the trace layer sees them, so
/// spans record them as redacted.
///
/// The endpoints are:
/// - `GET /` landing page, open to everyone
/// - `GET /home` profile page, signed-in users only
/// - `GET|POST /login` and `GET|POST /register`, anonymous visitors only
/// - `POST /logout`
pub fn session_auth_router(state: AuthState) -> Router {
    session_auth_router_no_trace(state)
        .layer(SetSensitiveResponseHeadersLayer::new(once(SET_COOKIE)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(true),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(SetSensitiveRequestHeadersLayer::new(once(COOKIE)))
}

/// Same as `session_auth_router()` but without the HTTP tracing middleware.
pub fn session_auth_router_no_trace(state: AuthState) -> Router {
    Router::new()
        .route(INDEX_PATH, get(index))
        .route(
            HOME_PATH,
            get(home).route_layer(from_fn_with_state(state.clone(), require_authenticated)),
        )
        .route(
            LOGIN_PATH,
            get(login_page)
                .post(login)
                .route_layer(from_fn_with_state(state.clone(), require_anonymous)),
        )
        .route(
            REGISTER_PATH,
            get(register_page)
                .post(register)
                .route_layer(from_fn_with_state(state.clone(), require_anonymous)),
        )
        .route(LOGOUT_PATH, post(logout))
        .with_state(state)
}
