use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;

use crate::constants::{LOGIN_PATH, SESSION_COOKIE};
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::flows::auth;
use crate::models::User;
use crate::session::StaleSession;
use crate::AppState;

/// Everything a handler knows about the request it is serving
///
/// Built once per request: one store connection, and the logged-in user
/// resolved from the session cookie. Handlers pass it explicitly into the
/// flows.
pub struct RequestContext {
    pub store: Store,
    pub user: Option<User>,
}

impl RequestContext {
    pub fn new(store: Store, user: Option<User>) -> Self {
        Self { store, user }
    }

    /// Login guard
    ///
    /// Hands out the store and the current user, or the redirect to send an
    /// anonymous visitor to instead of running the operation.
    pub fn require_login(&mut self) -> std::result::Result<(&mut Store, &User), Redirect> {
        match self.user.as_ref() {
            Some(user) => Ok((&mut self.store, user)),
            None => Err(Redirect::to(LOGIN_PATH)),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_user = state.sessions.resolve(&jar);

        let mut store = Store::acquire(&state.pool).await?;
        let user = auth::load_current_user(&mut store, session_user).await?;

        if user.is_none() && jar.get(SESSION_COOKIE).is_some() {
            if let Some(stale) = parts.extensions.get::<StaleSession>() {
                stale.mark();
            }
        }

        Ok(Self::new(store, user))
    }
}
