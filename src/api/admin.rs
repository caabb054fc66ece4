//! Back-office write endpoints. Role checks happen in the router.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{post, put};
use axum::{Extension, Json, Router};
use serde::Deserialize;

use crate::auth::models::AuthenticatedUser;
use crate::content::fallback::Fallback;
use crate::db::settings_repository::{PortalSettings, SettingsRepository};
use crate::error::AppError;
use crate::state::{AppState, HasCollection};

/// `POST /api/admin/<kind>`
pub async fn create_handler<T>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(record): Json<T>,
) -> Result<(StatusCode, Json<T>), AppError>
where
    T: Fallback,
    AppState: HasCollection<T>,
{
    let created = HasCollection::<T>::collection(&state).create(record).await?;
    tracing::info!(collection = T::COLLECTION, id = created.id(), by = %user.email, "Admin create");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/admin/<kind>/{id}`
pub async fn update_handler<T>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(record): Json<T>,
) -> Result<Json<T>, AppError>
where
    T: Fallback,
    AppState: HasCollection<T>,
{
    let updated = HasCollection::<T>::collection(&state)
        .update(&id, record)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", T::COLLECTION, id)))?;
    tracing::info!(collection = T::COLLECTION, id = %id, by = %user.email, "Admin update");
    Ok(Json(updated))
}

/// `DELETE /api/admin/<kind>/{id}`
pub async fn delete_handler<T>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    T: Fallback,
    AppState: HasCollection<T>,
{
    if !HasCollection::<T>::collection(&state).delete(&id).await? {
        return Err(AppError::NotFound(format!("{} '{}' not found", T::COLLECTION, id)));
    }
    tracing::info!(collection = T::COLLECTION, id = %id, by = %user.email, "Admin delete");
    Ok(StatusCode::NO_CONTENT)
}

/// CRUD routes for one content type, to be nested under `/api/admin/<kind>`.
pub fn crud_routes<T>() -> Router<AppState>
where
    T: Fallback,
    AppState: HasCollection<T>,
{
    Router::new()
        .route("/", post(create_handler::<T>))
        .route("/{id}", put(update_handler::<T>).delete(delete_handler::<T>))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub question_link: Option<String>,
}

/// `PUT /api/admin/settings`
pub async fn update_settings_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<PortalSettings>, AppError> {
    let settings = state
        .settings_repo
        .set_question_link(req.question_link.as_deref())
        .await?;
    tracing::info!(by = %user.email, "Portal settings updated");
    Ok(Json(settings))
}
