use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::{admin, content, search, users};
use crate::auth::login;
use crate::auth::middleware::{require_roles, RoleGate};
use crate::auth::models::{Role, CONTENT_ADMINS, OWNERS, PUBLISHERS};
use crate::content::fallback::Fallback;
use crate::db::models::{FaqEntry, GovernmentMember, JobPosting, NewsItem, Service, TreasuryEntry};
use crate::state::{AppState, HasCollection};

/// All JSON API routes: search, public content, auth and back-office.
pub fn api_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/search", get(search::search_handler))
        .route("/api/search/widget", get(search::widget_search_handler))
        .route("/api/services", get(content::list_services_handler))
        .route("/api/services/popular", get(content::popular_services_handler))
        .route("/api/services/{id}", get(content::get_service_handler))
        .route("/api/news", get(content::list_news_handler))
        .route("/api/news/categories", get(content::news_categories_handler))
        .route("/api/news/{id}", get(content::get_news_handler))
        .route("/api/jobs", get(content::list_jobs_handler))
        .route("/api/jobs/{id}", get(content::get_job_handler))
        .route("/api/faq", get(content::list_faq_handler))
        .route("/api/government/members", get(content::government_handler))
        .route("/api/treasury", get(content::treasury_handler))
        .route("/api/settings", get(content::settings_handler))
        .route("/api/auth/login", post(login::login_handler))
        .route("/api/auth/me", get(login::me_handler))
        .route("/api/auth/logout", post(login::logout_handler));

    let settings = Router::new()
        .route("/api/admin/settings", put(admin::update_settings_handler))
        .route_layer(from_fn_with_state(
            RoleGate::new(state.sessions.clone(), CONTENT_ADMINS),
            require_roles,
        ));

    let accounts = users::user_routes().route_layer(from_fn_with_state(
        RoleGate::new(state.sessions.clone(), OWNERS),
        require_roles,
    ));

    public
        .merge(settings)
        .nest("/api/admin/users", accounts)
        .nest("/api/admin/services", gated::<Service>(state, CONTENT_ADMINS))
        .nest("/api/admin/faq", gated::<FaqEntry>(state, CONTENT_ADMINS))
        .nest("/api/admin/government", gated::<GovernmentMember>(state, CONTENT_ADMINS))
        .nest("/api/admin/treasury", gated::<TreasuryEntry>(state, CONTENT_ADMINS))
        .nest("/api/admin/news", gated::<NewsItem>(state, PUBLISHERS))
        .nest("/api/admin/jobs", gated::<JobPosting>(state, PUBLISHERS))
        .layer(TraceLayer::new_for_http())
}

/// CRUD routes for `T` behind a role gate.
fn gated<T>(state: &AppState, allowed: &'static [Role]) -> Router<AppState>
where
    T: Fallback,
    AppState: HasCollection<T>,
{
    admin::crud_routes::<T>().route_layer(from_fn_with_state(
        RoleGate::new(state.sessions.clone(), allowed),
        require_roles,
    ))
}
