#![allow(dead_code)]

use axum::Router;

use edavis::api::routes::api_router;
use edavis::app::AppState;
use edavis::config::{AppConfig, StoreBackend};
use edavis::demo_seeder::seed_demo_data;
use edavis::state::Stores;

/// Router and stores of a portal running on the in-memory backend.
pub struct TestEnv {
    pub router: Router,
    pub stores: Stores,
    pub state: AppState,
}

impl TestEnv {
    /// In-memory portal seeded with the demo records and demo accounts.
    pub async fn start() -> Self {
        let stores = Stores::in_memory();
        seed_demo_data(&stores).await;
        Self::with_stores(stores, test_config())
    }

    /// Portal with empty stores.
    pub fn empty() -> Self {
        Self::with_stores(Stores::in_memory(), test_config())
    }

    /// Build a router over the given stores and configuration.
    pub fn with_stores(stores: Stores, config: AppConfig) -> Self {
        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("edavis")
            .build();

        let state = AppState::new(stores.clone(), &config, leptos_options);
        let router = api_router(&state).with_state(state.clone());

        Self {
            router,
            stores,
            state,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .save_cookies()
            .build(self.router.clone())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.store.backend = StoreBackend::Memory;
    config.auth.demo_accounts = true;
    config
}

/// Log in as the demo account of `role` (`owner`, `admin` or `moderator`).
pub async fn login_as(server: &axum_test::TestServer, role: &str) {
    server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": format!("{role}@demo.e-davis.gov"),
            "password": role
        }))
        .await
        .assert_status_ok();
}
