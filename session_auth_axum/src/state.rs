use std::sync::Arc;

use session_auth::{AuthFlow, SessionManager, UserStore};

/// Shared router state: the auth flow and, through it, the session manager
#[derive(Clone)]
pub struct AuthState {
    pub(crate) flow: Arc<AuthFlow>,
}

impl AuthState {
    pub fn new(flow: AuthFlow) -> Self {
        Self {
            flow: Arc::new(flow),
        }
    }

    /// Convenience constructor wiring a user directory to a session manager
    pub fn from_parts(users: Arc<dyn UserStore>, sessions: SessionManager) -> Self {
        Self::new(AuthFlow::new(users, sessions))
    }

    pub(crate) fn sessions(&self) -> &SessionManager {
        self.flow.sessions()
    }
}
