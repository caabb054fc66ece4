pub mod app;
pub mod auth;
pub mod error;
pub mod models {
    pub mod chat;
    pub mod search;
}
pub mod components {
    pub mod chat_widget;
}
pub mod db {
    pub mod memory;
    pub mod models;
    pub mod repository;
    pub mod settings_repository;
}
pub mod content {
    pub mod fallback;
    pub mod listing;
    pub mod treasury;
    #[cfg(feature = "ssr")]
    pub mod collection;
    #[cfg(feature = "ssr")]
    pub mod reader;
}

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod demo_seeder;
#[cfg(feature = "ssr")]
pub mod state;
#[cfg(feature = "ssr")]
pub mod search {
    pub mod aggregator;
}
#[cfg(feature = "ssr")]
pub mod api {
    pub mod admin;
    pub mod content;
    pub mod errors;
    pub mod routes;
    pub mod search;
    pub mod users;
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
