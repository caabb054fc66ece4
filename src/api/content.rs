//! Public read endpoints of the portal.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::content::collection::Collection;
use crate::content::fallback::Fallback;
use crate::content::listing::{news_by_category, popular_services, NewsCategory, Roster};
use crate::content::treasury::TreasuryReport;
use crate::db::models::{FaqEntry, JobPosting, NewsItem, Service};
use crate::db::settings_repository::{PortalSettings, SettingsRepository};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_POPULAR_LIMIT: usize = 4;

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Look up one record or fail with `NotFound`.
pub async fn process_get_one<T: Fallback>(
    collection: &Collection<T>,
    id: &str,
) -> Result<T, AppError> {
    collection
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} '{}' not found", T::COLLECTION, id)))
}

/// The served listing as an owned vector.
async fn listing<T: Fallback>(collection: &Arc<Collection<T>>) -> Result<Vec<T>, AppError> {
    Ok(collection.all().await?.as_ref().clone())
}

/// `GET /api/services`
pub async fn list_services_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(listing(&state.services).await?))
}

/// `GET /api/services/popular?limit=`
pub async fn popular_services_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = state.services.all().await?;
    let limit = params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT);
    Ok(Json(popular_services(&services, limit)))
}

/// `GET /api/services/{id}`
pub async fn get_service_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Service>, AppError> {
    Ok(Json(process_get_one(&state.services, &id).await?))
}

/// `GET /api/news`
pub async fn list_news_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsItem>>, AppError> {
    Ok(Json(listing(&state.news).await?))
}

/// `GET /api/news/categories`
pub async fn news_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsCategory>>, AppError> {
    let news = state.news.all().await?;
    Ok(Json(news_by_category(&news)))
}

/// `GET /api/news/{id}`
pub async fn get_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NewsItem>, AppError> {
    Ok(Json(process_get_one(&state.news, &id).await?))
}

/// `GET /api/jobs?limit=`, latest first.
pub async fn list_jobs_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let mut jobs = listing(&state.jobs).await?;
    if let Some(limit) = params.limit {
        jobs.truncate(limit);
    }
    Ok(Json(jobs))
}

/// `GET /api/jobs/{id}`
pub async fn get_job_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    Ok(Json(process_get_one(&state.jobs, &id).await?))
}

/// `GET /api/faq`
pub async fn list_faq_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<FaqEntry>>, AppError> {
    Ok(Json(listing(&state.faq).await?))
}

/// `GET /api/government/members`
pub async fn government_handler(State(state): State<AppState>) -> Result<Json<Roster>, AppError> {
    let members = state.government.all().await?;
    Ok(Json(Roster::from_members(&members)))
}

/// `GET /api/treasury`
pub async fn treasury_handler(
    State(state): State<AppState>,
) -> Result<Json<TreasuryReport>, AppError> {
    Ok(Json(TreasuryReport::new(listing(&state.treasury).await?)))
}

/// `GET /api/settings`
pub async fn settings_handler(
    State(state): State<AppState>,
) -> Result<Json<PortalSettings>, AppError> {
    Ok(Json(state.settings_repo.get_settings().await?))
}
