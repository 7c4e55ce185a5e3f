use async_trait::async_trait;
use tokio::sync::RwLock;

use super::errors::UserError;
use super::types::{User, UserId, UserStore};

/// User directory held in process memory, lost on restart
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    /// An empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// A directory holding `users` in the given order
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// The three demo accounts the server starts with
    pub fn seeded() -> Self {
        let seed = [
            ("Alex", "alex@gmail.com", "secret1"),
            ("Max", "max@gmail.com", "secret2"),
            ("Hagard", "hagard@gmail.com", "secret3"),
        ];
        let users = seed
            .into_iter()
            .zip(1..)
            .map(|((name, email, password), id)| User {
                id: UserId::new(id),
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .collect();
        tracing::info!("Seeding in-memory user directory with demo accounts");
        Self::with_users(users)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|user| user.email == email))
    }

    async fn create(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let id = i64::try_from(users.len() + 1)
            .map_err(|_| UserError::InvalidData("User id overflow".to_string()))?;
        let user = User {
            id: UserId::new(id),
            name,
            email,
            password,
        };
        users.push(user.clone());
        tracing::debug!("Created user {}", user.id);
        Ok(user)
    }

    async fn count(&self) -> Result<usize, UserError> {
        Ok(self.users.read().await.len())
    }

    async fn get_all_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.read().await.clone())
    }
}
