use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use http::HeaderValue;
use ring::rand::SecureRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),
}

pub(crate) fn base64url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random string".to_string()))?;
    Ok(base64url_encode(&bytes))
}

/// Attributes shared by every Set-Cookie header this crate emits
pub(crate) struct CookieAttributes<'a> {
    pub(crate) name: &'a str,
    pub(crate) secure: bool,
}

pub(crate) fn set_cookie_value(
    attrs: &CookieAttributes<'_>,
    value: &str,
    expires_at: DateTime<Utc>,
    max_age: i64,
) -> Result<HeaderValue, UtilError> {
    let expires = expires_at.format("%a, %d %b %Y %H:%M:%S GMT");
    let mut cookie = format!(
        "{}={value}; Path=/; Expires={expires}; Max-Age={max_age}; HttpOnly; SameSite=Strict",
        attrs.name
    );
    if attrs.secure {
        cookie.push_str("; Secure");
    }
    tracing::trace!("Set-Cookie: {}", attrs.name);
    cookie
        .parse()
        .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_gen_random_string_is_url_safe_and_unique() {
        let a = gen_random_string(32).unwrap();
        let b = gen_random_string(32).unwrap();
        assert_ne!(a, b);
        // 32 bytes encode to 43 unpadded base64url characters
        assert_eq!(a.len(), 43);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_set_cookie_value_attributes() {
        let attrs = CookieAttributes {
            name: "sid",
            secure: true,
        };
        let expires_at = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();

        let header = set_cookie_value(&attrs, "abc.def", expires_at, 7200).unwrap();
        let header = header.to_str().unwrap();

        assert!(header.starts_with("sid=abc.def; "));
        assert!(header.contains("Path=/"));
        assert!(header.contains("Expires=Wed, 02 Jan 2030 03:04:05 GMT"));
        assert!(header.contains("Max-Age=7200"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Strict"));
        assert!(header.ends_with("; Secure"));
    }

    #[test]
    fn test_set_cookie_value_without_secure() {
        let attrs = CookieAttributes {
            name: "sid",
            secure: false,
        };
        let header = set_cookie_value(&attrs, "v", Utc::now(), 10).unwrap();
        assert!(!header.to_str().unwrap().contains("Secure"));
    }

    #[test]
    fn test_set_cookie_value_rejects_control_characters() {
        let attrs = CookieAttributes {
            name: "sid",
            secure: false,
        };
        let result = set_cookie_value(&attrs, "bad\nvalue", Utc::now(), 10);
        assert!(matches!(result, Err(UtilError::Cookie(_))));
    }
}
