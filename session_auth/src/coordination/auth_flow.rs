use http::HeaderMap;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::{HOME_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::session::{SessionContext, SessionManager};
use crate::userdb::{UserId, UserStore};

use super::errors::CoordinationError;

/// Fields posted by the login form. Absent fields deserialize to `None`.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Fields posted by the registration form
#[derive(Clone, Default, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// What happened to the session during a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// Nothing was written; no cookie is sent
    Unchanged,
    /// A new session was stored for `user_id`; `cookie` is the signed value to deliver
    Established { user_id: UserId, cookie: String },
    /// The session record was removed; the client cookie must be cleared
    Destroyed,
}

/// Result of a transition: where to send the visitor and how the session changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub redirect_to: &'static str,
    pub session: SessionChange,
}

impl AuthOutcome {
    fn back_to(path: &'static str) -> Self {
        Self {
            redirect_to: path,
            session: SessionChange::Unchanged,
        }
    }
}

/// A present, non-empty form field
fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Login, registration and logout over an injected user directory
///
/// Gates are not applied here; the router runs
/// [`require_anonymous`](crate::require_anonymous) before `login` and
/// `register`.
pub struct AuthFlow {
    users: Arc<dyn UserStore>,
    sessions: SessionManager,
    // Serializes the exists-then-create sequence of registration
    registration: Mutex<()>,
}

impl AuthFlow {
    pub fn new(users: Arc<dyn UserStore>, sessions: SessionManager) -> Self {
        Self {
            users,
            sessions,
            registration: Mutex::new(()),
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn users(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Anonymous → Authenticated on matching credentials
    ///
    /// Unknown email, wrong password and missing fields all send the visitor
    /// back to the login form without distinguishing between them.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, form: LoginForm) -> Result<AuthOutcome, CoordinationError> {
        let (Some(email), Some(password)) = (required(&form.email), required(&form.password))
        else {
            tracing::debug!("Login refused: missing fields");
            return Ok(AuthOutcome::back_to(LOGIN_PATH));
        };

        let Some(user) = self.users.find_by_credentials(email, password).await? else {
            tracing::debug!("Login refused: no matching user");
            return Ok(AuthOutcome::back_to(LOGIN_PATH));
        };

        let cookie = self.sessions.create_session(user.id).await?;
        tracing::debug!("User {} logged in", user.id);
        Ok(AuthOutcome {
            redirect_to: HOME_PATH,
            session: SessionChange::Established {
                user_id: user.id,
                cookie,
            },
        })
    }

    /// Anonymous → Authenticated by creating a new user
    ///
    /// A taken email or a missing field sends the visitor back to the
    /// registration form and leaves the directory untouched.
    #[tracing::instrument(skip_all)]
    pub async fn register(&self, form: RegisterForm) -> Result<AuthOutcome, CoordinationError> {
        let (Some(name), Some(email), Some(password)) = (
            required(&form.name),
            required(&form.email),
            required(&form.password),
        ) else {
            tracing::debug!("Registration refused: missing fields");
            return Ok(AuthOutcome::back_to(REGISTER_PATH));
        };

        let user = {
            let _guard = self.registration.lock().await;
            if self.users.exists_by_email(email).await? {
                tracing::debug!("Registration refused: email already registered");
                return Ok(AuthOutcome::back_to(REGISTER_PATH));
            }
            self.users
                .create(name.to_string(), email.to_string(), password.to_string())
                .await?
        };

        let cookie = self.sessions.create_session(user.id).await?;
        tracing::debug!("User {} registered and logged in", user.id);
        Ok(AuthOutcome {
            redirect_to: HOME_PATH,
            session: SessionChange::Established {
                user_id: user.id,
                cookie,
            },
        })
    }

    /// Any state → Anonymous
    ///
    /// When the store refuses to delete the record the visitor is sent home
    /// and the cookie is kept, so the session stays whatever the store left.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&self, session: &SessionContext) -> AuthOutcome {
        if let Some(session_id) = session.session_id() {
            if let Err(e) = self.sessions.destroy(session_id).await {
                tracing::warn!("Failed to destroy session: {}", e);
                return AuthOutcome::back_to(HOME_PATH);
            }
        }

        AuthOutcome {
            redirect_to: LOGIN_PATH,
            session: SessionChange::Destroyed,
        }
    }

    /// Logout for a request that has not been resolved to a session yet
    ///
    /// A store that cannot be read is handled like one that refuses the
    /// delete: the visitor is sent home and the cookie is kept.
    pub async fn logout_from_headers(&self, headers: &HeaderMap) -> AuthOutcome {
        match self.sessions.load(headers).await {
            Ok(session) => self.logout(&session).await,
            Err(e) => {
                tracing::warn!("Failed to resolve session for logout: {}", e);
                AuthOutcome::back_to(HOME_PATH)
            }
        }
    }
}
