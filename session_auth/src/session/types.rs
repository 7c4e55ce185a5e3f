use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::errors::SessionError;
use crate::storage::CacheData;
use crate::userdb::UserId;

/// Session record as persisted in the cache store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct StoredSession {
    pub(super) user_id: UserId,
    pub(super) expires_at: DateTime<Utc>,
}

impl TryFrom<&StoredSession> for CacheData {
    type Error = SessionError;

    fn try_from(data: &StoredSession) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(data)
                .map_err(|e| SessionError::InvalidRecord(e.to_string()))?,
        })
    }
}

impl TryFrom<CacheData> for StoredSession {
    type Error = SessionError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| SessionError::InvalidRecord(e.to_string()))
    }
}

/// The per-request view of the session
///
/// Carries only the authentication signal and the identifier needed to
/// destroy the record. A request without a live session is anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    session_id: Option<String>,
    user_id: Option<UserId>,
}

impl SessionContext {
    /// No session record is attached to the request
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A live session record carrying `user_id`
    pub fn authenticated(session_id: impl Into<String>, user_id: UserId) -> Self {
        Self {
            session_id: Some(session_id.into()),
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}
