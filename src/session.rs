//! Client-held, signed session tokens
//!
//! The only state is the `session` cookie, whose value is the user id plus an
//! HMAC-SHA256 signature. Nothing is stored server-side.

use axum::{
    extract::Request,
    http::{header::SET_COOKIE, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use hmac::digest::InvalidLength;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::constants::SESSION_COOKIE;
use crate::security::{decode_session_token, encode_session_token, signing_key, SigningKey};

/// Issues, resolves and clears session cookies
#[derive(Clone)]
pub struct SessionManager {
    key: SigningKey,
    secure: bool,
}

impl SessionManager {
    pub fn new(config: &Config) -> Result<Self, InvalidLength> {
        Ok(Self {
            key: signing_key(&config.secret_key)?,
            secure: config.secure_cookies(),
        })
    }

    /// User id carried by the request's session cookie
    ///
    /// `None` when the cookie is absent, malformed or fails the signature check.
    pub fn resolve(&self, jar: &CookieJar) -> Option<i64> {
        let cookie = jar.get(SESSION_COOKIE)?;
        decode_session_token(cookie.value(), &self.key)
    }

    /// Add a fresh session cookie bound to `user_id`
    pub fn start(&self, jar: CookieJar, user_id: i64) -> CookieJar {
        let token = encode_session_token(user_id, &self.key);
        let cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        jar.add(cookie)
    }

    /// Replace the session cookie with an expired, empty one
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

/// Set by the request context when the session cookie did not resolve to a user
#[derive(Debug, Clone, Default)]
pub struct StaleSession(Arc<AtomicBool>);

impl StaleSession {
    pub fn mark(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_marked(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Expire session cookies that failed re-validation
///
/// Runs around every handler. If the handler found the cookie invalid or bound
/// to a user that no longer exists, a removal cookie is appended to the
/// response, unless the handler already set a session of its own.
pub async fn expire_stale_session(mut req: Request, next: Next) -> Response {
    let stale = StaleSession::default();
    req.extensions_mut().insert(stale.clone());

    let mut response = next.run(req).await;

    if stale.is_marked() && !sets_session_cookie(&response) {
        let mut removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
        removal.make_removal();

        match HeaderValue::from_str(&removal.to_string()) {
            Ok(value) => {
                tracing::debug!("Clearing stale session cookie");
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Failed to encode session removal cookie: {}", e),
        }
    }

    response
}

fn sets_session_cookie(response: &Response) -> bool {
    let prefix = format!("{SESSION_COOKIE}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(&prefix))
}
