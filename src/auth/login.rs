use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::models::AuthenticatedUser;
use crate::auth::session::{removal_cookie, session_cookie, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: AuthenticatedUser,
}

/// `POST /api/auth/login`
///
/// Checks the credentials and opens a session held in an http-only cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let user = state.credentials.sign_in(&req.email, &req.password).await?;
    let token = state.sessions.create(user.clone()).await;

    Ok((
        jar.add(session_cookie(token, state.sessions.ttl())),
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user,
        }),
    ))
}

/// `GET /api/auth/me`
pub async fn me_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<AuthenticatedUser>, AppError> {
    state
        .sessions
        .current_user(&jar)
        .await
        .map(Json)
        .ok_or_else(|| AppError::Auth("Not logged in".into()))
}

/// `POST /api/auth/logout`
///
/// Ends the server-side session and clears the cookie.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }
    (jar.remove(removal_cookie()), StatusCode::NO_CONTENT)
}
