//! Access gates evaluated before a route handler runs
//!
//! Each gate looks only at the session's authentication signal, so its
//! decision is stable for as long as the session is not modified.

use crate::config::{HOME_PATH, LOGIN_PATH};
use crate::session::SessionContext;

/// Outcome of evaluating a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Let the handler run
    Proceed,
    /// Skip the handler and send the visitor to this path
    Redirect(&'static str),
}

/// Protected pages: anonymous visitors go to the login form.
pub fn require_authenticated(session: &SessionContext) -> Gate {
    if session.is_authenticated() {
        Gate::Proceed
    } else {
        Gate::Redirect(LOGIN_PATH)
    }
}

/// Anonymous-only pages: signed-in visitors go home.
pub fn require_anonymous(session: &SessionContext) -> Gate {
    if session.is_authenticated() {
        Gate::Redirect(HOME_PATH)
    } else {
        Gate::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::userdb::UserId;
    use proptest::prelude::*;

    #[test]
    fn test_anonymous_session() {
        let session = SessionContext::anonymous();

        assert_eq!(require_authenticated(&session), Gate::Redirect("/login"));
        assert_eq!(require_anonymous(&session), Gate::Proceed);
    }

    #[test]
    fn test_authenticated_session() {
        let session = SessionContext::authenticated("sid", UserId::new(1));

        assert_eq!(require_authenticated(&session), Gate::Proceed);
        assert_eq!(require_anonymous(&session), Gate::Redirect("/home"));
    }

    fn session_strategy() -> impl Strategy<Value = SessionContext> {
        prop_oneof![
            Just(SessionContext::anonymous()),
            ("[A-Za-z0-9_-]{1,43}", any::<i64>())
                .prop_map(|(sid, id)| SessionContext::authenticated(sid, UserId::new(id))),
        ]
    }

    proptest! {
        /// Evaluating a gate twice without mutation yields the same decision
        #[test]
        fn test_gates_are_idempotent(session in session_strategy()) {
            prop_assert_eq!(require_authenticated(&session), require_authenticated(&session));
            prop_assert_eq!(require_anonymous(&session), require_anonymous(&session));
        }

        /// Exactly one of the two gates lets any given session through
        #[test]
        fn test_gates_are_complementary(session in session_strategy()) {
            let authenticated = require_authenticated(&session) == Gate::Proceed;
            let anonymous = require_anonymous(&session) == Gate::Proceed;
            prop_assert!(authenticated != anonymous);
            prop_assert_eq!(authenticated, session.is_authenticated());
        }
    }
}
