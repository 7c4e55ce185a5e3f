//! Signed session cookie values
//!
//! A cookie value is `<session_id>.<tag>` where `tag` is the base64url
//! HMAC-SHA256 of the session id under the configured secret. Values whose
//! tag does not verify are treated as if no cookie had been sent.

use headers::{Cookie, HeaderMapExt};
use hmac::{Hmac, Mac};
use http::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::utils::{UtilError, base64url_encode};

type HmacSha256 = Hmac<Sha256>;

fn tag(secret: &[u8], session_id: &str) -> Result<String, UtilError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| UtilError::Crypto(format!("Invalid signing key: {e}")))?;
    mac.update(session_id.as_bytes());
    Ok(base64url_encode(&mac.finalize().into_bytes()))
}

pub(super) fn sign(secret: &[u8], session_id: &str) -> Result<String, UtilError> {
    Ok(format!("{session_id}.{}", tag(secret, session_id)?))
}

/// Returns the session id carried by `value` if its tag verifies.
pub(super) fn unsign<'a>(secret: &[u8], value: &'a str) -> Option<&'a str> {
    let (session_id, received) = value.rsplit_once('.')?;
    if session_id.is_empty() {
        return None;
    }
    let expected = tag(secret, session_id).ok()?;
    if bool::from(expected.as_bytes().ct_eq(received.as_bytes())) {
        Some(session_id)
    } else {
        tracing::debug!("Session cookie signature mismatch");
        None
    }
}

/// Raw value of the cookie named `cookie_name`, if the request carries one.
pub(super) fn cookie_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let Some(cookies) = headers.typed_get::<Cookie>() else {
        tracing::trace!("No cookie header found");
        return None;
    };
    let value = cookies.get(cookie_name).map(str::to_string);
    if value.is_none() {
        tracing::trace!("No session cookie '{}' found in cookies", cookie_name);
    }
    value
}
