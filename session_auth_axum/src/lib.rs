mod error;
mod handlers;
mod middleware;
mod pages;
mod router;
mod session;
mod state;

pub use middleware::{require_anonymous, require_authenticated};
pub use router::{session_auth_router, session_auth_router_no_trace};
pub use session::CurrentSession;
pub use state::AuthState;

// Re-export the core types needed to assemble an AuthState
pub use session_auth::{
    AuthFlow, InMemoryUserStore, PORT, SessionConfig, SessionContext, SessionManager, UserStore,
};
