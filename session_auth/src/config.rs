//! Central configuration for the session_auth crate

use std::env;
use std::sync::LazyLock;

/// Landing page, reachable in any state
pub const INDEX_PATH: &str = "/";
/// Profile page, authenticated visitors only
pub const HOME_PATH: &str = "/home";
/// Login form and submission, anonymous visitors only
pub const LOGIN_PATH: &str = "/login";
/// Registration form and submission, anonymous visitors only
pub const REGISTER_PATH: &str = "/register";
/// Session teardown, reachable in any state
pub const LOGOUT_PATH: &str = "/logout";

const DEFAULT_COOKIE_NAME: &str = "sid";
const DEFAULT_COOKIE_MAX_AGE: u64 = 60 * 60 * 2;
const DEFAULT_SECRET: &str = "symmetric-key";
const DEFAULT_APP_ENV: &str = "development";
const DEFAULT_PORT: u16 = 3000;

/// Port the demo server listens on
/// Default: 3000
pub static PORT: LazyLock<u16> = LazyLock::new(|| parse_port(env::var("PORT").ok().as_deref()));

/// Session cookie and signing parameters
///
/// Built once at startup with [`SessionConfig::from_env`] and handed to the
/// [`SessionManager`](crate::SessionManager). Tests construct it directly.
#[derive(Clone)]
pub struct SessionConfig {
    /// Name of the session cookie
    pub cookie_name: String,
    /// Absolute session lifetime in seconds
    pub max_age: u64,
    /// Whether the `Secure` attribute is emitted
    pub secure: bool,
    pub(crate) secret: Vec<u8>,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("cookie_name", &self.cookie_name)
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .field("secret", &"[redacted]")
            .finish()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age: DEFAULT_COOKIE_MAX_AGE,
            secure: secure_for_environment(DEFAULT_APP_ENV),
            secret: DEFAULT_SECRET.as_bytes().to_vec(),
        }
    }
}

impl SessionConfig {
    /// Read configuration from `SESSION_COOKIE_NAME`, `SESSION_COOKIE_MAX_AGE`,
    /// `SESSION_SECRET` and `APP_ENV`, falling back to defaults.
    pub fn from_env() -> Self {
        let cookie_name =
            env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string());
        let max_age = parse_max_age(env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref());
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_APP_ENV.to_string());

        let secret = match env::var("SESSION_SECRET") {
            Ok(secret) => secret.into_bytes(),
            Err(_) => {
                tracing::warn!("SESSION_SECRET not set, signing cookies with the placeholder key");
                DEFAULT_SECRET.as_bytes().to_vec()
            }
        };

        Self {
            cookie_name,
            max_age,
            secure: secure_for_environment(&app_env),
            secret,
        }
    }

    /// Replace the signing key
    pub fn with_secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.secret = secret.into();
        self
    }
}

fn parse_max_age(value: Option<&str>) -> u64 {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_COOKIE_MAX_AGE)
}

fn parse_port(value: Option<&str>) -> u16 {
    value.and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_PORT)
}

// Any non-empty environment name turns the Secure attribute on.
fn secure_for_environment(app_env: &str) -> bool {
    !app_env.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper function to set an environment variable for the duration of the test
    /// and restore the original value afterward.
    fn with_env_var<F, R>(key: &str, value: Option<&str>, test: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();

        match value {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }

        let result = test();

        match original {
            Some(val) => unsafe { env::set_var(key, val) },
            None => unsafe { env::remove_var(key) },
        }

        result
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "sid");
        assert_eq!(config.max_age, 7200);
        assert!(config.secure);
        assert_eq!(config.secret, b"symmetric-key".to_vec());
    }

    #[test]
    fn test_parse_max_age() {
        assert_eq!(parse_max_age(None), 7200);
        assert_eq!(parse_max_age(Some("1800")), 1800);
        assert_eq!(parse_max_age(Some("invalid")), 7200);
        assert_eq!(parse_max_age(Some("-5")), 7200);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(None), 3000);
        assert_eq!(parse_port(Some("8080")), 8080);
        assert_eq!(parse_port(Some("not-a-port")), 3000);
        assert_eq!(parse_port(Some("70000")), 3000);
    }

    #[test]
    fn test_secure_for_environment() {
        assert!(secure_for_environment("development"));
        assert!(secure_for_environment("production"));
        assert!(!secure_for_environment(""));
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        with_env_var("SESSION_COOKIE_NAME", Some("custom_sid"), || {
            with_env_var("SESSION_COOKIE_MAX_AGE", Some("60"), || {
                with_env_var("APP_ENV", Some(""), || {
                    with_env_var("SESSION_SECRET", Some("another-key"), || {
                        let config = SessionConfig::from_env();
                        assert_eq!(config.cookie_name, "custom_sid");
                        assert_eq!(config.max_age, 60);
                        assert!(!config.secure);
                        assert_eq!(config.secret, b"another-key".to_vec());
                    })
                })
            })
        });
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        with_env_var("SESSION_COOKIE_NAME", None, || {
            with_env_var("SESSION_COOKIE_MAX_AGE", None, || {
                with_env_var("APP_ENV", None, || {
                    with_env_var("SESSION_SECRET", None, || {
                        let config = SessionConfig::from_env();
                        assert_eq!(config.cookie_name, "sid");
                        assert_eq!(config.max_age, 7200);
                        assert!(config.secure);
                        assert_eq!(config.secret, b"symmetric-key".to_vec());
                    })
                })
            })
        });
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = SessionConfig::default().with_secret("top-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("[redacted]"));
    }
}
