use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use moka::future::Cache;

use crate::auth::models::AuthenticatedUser;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "edavis_session";

/// In-process session table keyed by opaque random tokens.
///
/// Sessions expire `ttl` after creation and do not survive a restart.
pub struct SessionStore {
    sessions: Cache<String, AuthenticatedUser>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session for `user` and return its token.
    pub async fn create(&self, user: AuthenticatedUser) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        tracing::info!(user = %user.email, role = %user.role, "Session opened");
        self.sessions.insert(token.clone(), user).await;
        token
    }

    pub async fn get(&self, token: &str) -> Option<AuthenticatedUser> {
        self.sessions.get(token).await
    }

    pub async fn remove(&self, token: &str) {
        self.sessions.invalidate(token).await;
    }

    /// Close every session of `user_id`. Returns how many were closed.
    pub async fn revoke_user(&self, user_id: &str) -> usize {
        let tokens: Vec<_> = self
            .sessions
            .iter()
            .filter(|(_, user)| user.user_id == user_id)
            .map(|(token, _)| token)
            .collect();
        for token in &tokens {
            self.sessions.invalidate(token.as_str()).await;
        }
        tokens.len()
    }

    /// The user behind the session cookie in `jar`, if any.
    pub async fn current_user(&self, jar: &CookieJar) -> Option<AuthenticatedUser> {
        let cookie = jar.get(SESSION_COOKIE)?;
        self.get(cookie.value()).await
    }
}

/// Http-only cookie carrying `token`, expiring with the session.
pub fn session_cookie(token: String, ttl: Duration) -> Cookie<'static> {
    let max_age = time::Duration::seconds(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Cookie that clears the session token on the client.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").removal().build()
}
