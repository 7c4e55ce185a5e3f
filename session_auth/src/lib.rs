//! session_auth - Cookie session authentication core
//!
//! This crate provides the framework-agnostic pieces of a login/register/logout
//! flow: an in-memory user directory, a signed-cookie session store, the
//! access gates that decide between proceeding and redirecting, and the
//! coordination logic that moves a session between anonymous and
//! authenticated.

mod config;
mod coordination;
mod guard;
mod session;
mod storage;
mod userdb;
mod utils;

pub use config::{
    HOME_PATH, INDEX_PATH, LOGIN_PATH, LOGOUT_PATH, PORT, REGISTER_PATH, SessionConfig,
};

pub use coordination::{
    AuthFlow, AuthOutcome, CoordinationError, LoginForm, RegisterForm, SessionChange,
};

pub use guard::{Gate, require_anonymous, require_authenticated};

pub use session::{SessionContext, SessionError, SessionManager};

pub use storage::{CacheData, CacheStore, InMemoryCacheStore, StorageError};

pub use userdb::{InMemoryUserStore, User, UserError, UserId, UserStore};

pub use utils::UtilError;

#[cfg(test)]
mod test_utils;
