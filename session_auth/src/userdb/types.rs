use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::UserError;

/// Numeric user identifier, assigned as `count + 1` at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user
///
/// The password is held as submitted; this directory performs no hashing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Compared byte-for-byte, no case folding
    pub email: String,
    pub password: String,
}

/// The user directory consulted by the auth flow
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// First user, in insertion order, whose email and password both match exactly.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, UserError>;

    /// Whether any user carries exactly this email.
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError>;

    /// Append a user with `id = count + 1`.
    ///
    /// Email uniqueness is not checked here; callers check
    /// [`exists_by_email`](UserStore::exists_by_email) first.
    async fn create(&self, name: String, email: String, password: String)
    -> Result<User, UserError>;

    /// Number of users in the directory.
    async fn count(&self) -> Result<usize, UserError>;

    /// All users in insertion order.
    async fn get_all_users(&self) -> Result<Vec<User>, UserError>;
}
