//! Stateless admin session.
//!
//! There is no session table. The cookie carries a keyed hash of the
//! configured credentials; every request recomputes the expected value and
//! compares in constant time. Rotating the password or the store connection
//! string logs everybody out.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::AppConfig;

pub const COOKIE_NAME: &str = "valentine_admin_session";
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 8;

type HmacSha256 = Hmac<Sha256>;

/// Derive the session token for a credential pair under `secret`.
pub fn build_token(username: &str, password: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(username.as_bytes());
    mac.update(b":");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison. Different lengths fail immediately.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// The single admin identity and the token it is allowed to hold.
#[derive(Clone)]
pub struct AdminAuth {
    username: String,
    password: String,
    expected_token: String,
    secure_cookie: bool,
}

impl AdminAuth {
    pub fn new(username: &str, password: &str, secret: &str, secure_cookie: bool) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            expected_token: build_token(username, password, secret),
            secure_cookie,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.admin_username,
            &config.admin_password,
            config.session_secret(),
            config.production,
        )
    }

    /// Check a submitted credential pair. Both halves are always compared.
    pub fn validate_credentials(&self, username: &str, password: &str) -> bool {
        let user_ok = constant_time_eq(username, &self.username);
        let pass_ok = constant_time_eq(password, &self.password);
        user_ok & pass_ok
    }

    /// Token for a successful login. Same value for every login until the
    /// configuration changes.
    pub fn issue_token(&self) -> &str {
        &self.expected_token
    }

    pub fn verify(&self, cookie_value: &str) -> bool {
        constant_time_eq(cookie_value, &self.expected_token)
    }

    /// Read the session cookie off a request and verify it.
    pub fn is_authenticated(&self, req: &HttpRequest) -> bool {
        req.cookie(COOKIE_NAME)
            .is_some_and(|cookie| self.verify(cookie.value()))
    }

    pub fn session_cookie(&self) -> Cookie<'static> {
        Cookie::build(COOKIE_NAME, self.expected_token.clone())
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::seconds(SESSION_TTL_SECS))
            .finish()
    }

    pub fn cleared_cookie(&self) -> Cookie<'static> {
        Cookie::build(COOKIE_NAME, "")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::ZERO)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_deterministic_and_keyed() {
        let a = build_token("admin", "pw", "local");
        let b = build_token("admin", "pw", "local");
        let c = build_token("admin", "pw", "postgres://elsewhere");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn constant_time_eq_rejects_length_mismatch() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
        assert!(!constant_time_eq("", "a"));
    }
}
