use chrono::{DateTime, Duration, Utc};
use http::{HeaderMap, HeaderValue};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::SessionConfig;
use crate::session::cookie::{cookie_from_headers, sign, unsign};
use crate::session::errors::SessionError;
use crate::session::types::{SessionContext, StoredSession};
use crate::storage::{CacheData, CacheStore, InMemoryCacheStore};
use crate::userdb::UserId;
use crate::utils::{CookieAttributes, gen_random_string, set_cookie_value};

const SESSION_PREFIX: &str = "session";

/// Owns the session store and the cookie contract
///
/// Sessions are written only when a user id is attached, and never re-saved
/// afterwards, so the lifetime stays absolute from login.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<Mutex<Box<dyn CacheStore>>>,
    config: Arc<SessionConfig>,
}

impl SessionManager {
    /// Session manager backed by an in-memory cache store
    pub fn new(config: SessionConfig) -> Self {
        Self::with_store(config, Box::new(InMemoryCacheStore::new()))
    }

    pub fn with_store(config: SessionConfig, store: Box<dyn CacheStore>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Resolve the session attached to a request.
    ///
    /// A missing cookie, a bad signature, and an unknown or expired record all
    /// yield an anonymous context.
    #[tracing::instrument(skip_all)]
    pub async fn load(&self, headers: &HeaderMap) -> Result<SessionContext, SessionError> {
        let Some(cookie) = cookie_from_headers(headers, &self.config.cookie_name) else {
            return Ok(SessionContext::anonymous());
        };
        let Some(session_id) = unsign(&self.config.secret, &cookie) else {
            return Ok(SessionContext::anonymous());
        };

        let cached = self.store.lock().await.get(SESSION_PREFIX, session_id).await?;
        let Some(cached) = cached else {
            tracing::debug!("No session record for presented cookie");
            return Ok(SessionContext::anonymous());
        };

        let stored = match StoredSession::try_from(cached) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Discarding unreadable session record: {}", e);
                return Ok(SessionContext::anonymous());
            }
        };

        if stored.expires_at <= Utc::now() {
            tracing::debug!("Session expired at {}", stored.expires_at);
            self.store
                .lock()
                .await
                .remove(SESSION_PREFIX, session_id)
                .await?;
            return Ok(SessionContext::anonymous());
        }

        Ok(SessionContext::authenticated(session_id, stored.user_id))
    }

    /// Persist a new session for `user_id` and return the signed cookie value.
    pub async fn create_session(&self, user_id: UserId) -> Result<String, SessionError> {
        let session_id = gen_random_string(32)?;
        let stored = StoredSession {
            user_id,
            expires_at: self.expires_at()?,
        };

        self.store
            .lock()
            .await
            .put_with_ttl(
                SESSION_PREFIX,
                &session_id,
                CacheData::try_from(&stored)?,
                self.config.max_age,
            )
            .await?;

        tracing::debug!("Created session for user {}", user_id);
        Ok(sign(&self.config.secret, &session_id)?)
    }

    /// Delete the session record.
    pub async fn destroy(&self, session_id: &str) -> Result<(), SessionError> {
        self.store
            .lock()
            .await
            .remove(SESSION_PREFIX, session_id)
            .await?;
        tracing::debug!("Destroyed session");
        Ok(())
    }

    /// Set-Cookie value delivering a freshly signed session cookie
    pub fn session_cookie(&self, signed_value: &str) -> Result<HeaderValue, SessionError> {
        let max_age = i64::try_from(self.config.max_age)
            .map_err(|_| SessionError::HeaderError("Max-Age out of range".to_string()))?;
        Ok(set_cookie_value(
            &self.cookie_attributes(),
            signed_value,
            self.expires_at()?,
            max_age,
        )?)
    }

    /// Set-Cookie value instructing the client to drop the session cookie
    pub fn clear_cookie(&self) -> Result<HeaderValue, SessionError> {
        Ok(set_cookie_value(
            &self.cookie_attributes(),
            "",
            DateTime::<Utc>::UNIX_EPOCH,
            0,
        )?)
    }

    fn cookie_attributes(&self) -> CookieAttributes<'_> {
        CookieAttributes {
            name: &self.config.cookie_name,
            secure: self.config.secure,
        }
    }

    fn expires_at(&self) -> Result<DateTime<Utc>, SessionError> {
        i64::try_from(self.config.max_age)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|max_age| Utc::now().checked_add_signed(max_age))
            .ok_or_else(|| SessionError::HeaderError("Max-Age out of range".to_string()))
    }
}
