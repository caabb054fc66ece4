use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::auth::models::{has_role, Role};
use crate::auth::session::SessionStore;
use crate::error::AppError;

/// State of a role-gated route group.
#[derive(Clone)]
pub struct RoleGate {
    sessions: Arc<SessionStore>,
    allowed: &'static [Role],
}

impl RoleGate {
    pub fn new(sessions: Arc<SessionStore>, allowed: &'static [Role]) -> Self {
        Self { sessions, allowed }
    }
}

/// Admits the request only when the session user holds an allowed role.
///
/// No session yields 401, a session with another role yields 403.
/// The user is inserted into the request extensions for handlers.
pub async fn require_roles(
    State(gate): State<RoleGate>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = gate
        .sessions
        .current_user(&jar)
        .await
        .ok_or_else(|| AppError::Auth("Not logged in".into()))?;

    if !has_role(Some(&user), gate.allowed) {
        tracing::warn!(
            user = %user.email,
            role = %user.role,
            path = %req.uri().path(),
            "Role not permitted"
        );
        return Err(AppError::Forbidden(format!(
            "Role '{}' may not access this area",
            user.role
        )));
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
