//! Auth flow coordination
//!
//! Ties the user directory and the session manager together into the
//! login, registration and logout transitions.

mod auth_flow;
mod errors;

pub use auth_flow::{AuthFlow, AuthOutcome, LoginForm, RegisterForm, SessionChange};
pub use errors::CoordinationError;
