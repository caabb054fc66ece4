//! Administrator account management. Owner-only; the router applies the gate.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};

use crate::auth::accounts::{AccountChanges, AccountProfile, NewAccount};
use crate::auth::models::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Account '{}' not found", id))
}

/// `GET /api/admin/users`
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountProfile>>, AppError> {
    Ok(Json(state.accounts.list().await?))
}

/// `GET /api/admin/users/{id}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountProfile>, AppError> {
    state
        .accounts
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

/// `POST /api/admin/users`
pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<NewAccount>,
) -> Result<(StatusCode, Json<AccountProfile>), AppError> {
    let created = state.accounts.create(req).await?;
    tracing::info!(id = %created.id, by = %user.email, "Admin account created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/admin/users/{id}`
///
/// Open sessions of the account are closed so the new role applies at the
/// next sign-in.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<AccountChanges>,
) -> Result<Json<AccountProfile>, AppError> {
    let updated = state
        .accounts
        .update(&id, req, &user)
        .await?
        .ok_or_else(|| not_found(&id))?;
    let closed = state.sessions.revoke_user(&id).await;
    tracing::info!(id = %id, by = %user.email, closed, "Admin account updated");
    Ok(Json(updated))
}

/// `DELETE /api/admin/users/{id}`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.accounts.delete(&id, &user).await? {
        return Err(not_found(&id));
    }
    let closed = state.sessions.revoke_user(&id).await;
    tracing::info!(id = %id, by = %user.email, closed, "Admin account deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Account routes, to be nested under `/api/admin/users`.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users_handler).post(create_user_handler))
        .route(
            "/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
}
