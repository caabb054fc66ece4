#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum::Router;
    use edavis::app::{shell, App, AppState};
    use edavis::config::AppConfig;
    use edavis::state::Stores;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::services::ServeDir;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edavis=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting E-Davis portal...");

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None).context("Failed to read Leptos configuration")?;
    let leptos_options = conf.leptos_options;
    let addr = match &config.server.addr {
        Some(addr) => addr.parse().context("Invalid server.addr")?,
        None => leptos_options.site_addr,
    };
    let site_root = leptos_options.site_root.to_string();

    let stores = Stores::connect(&config)
        .await
        .context("Failed to set up the content store")?;

    if config.content.seed_demo {
        edavis::demo_seeder::seed_demo_data(&stores).await;
    }

    let app_state = AppState::new(stores, &config, leptos_options.clone());

    // Generate the Leptos route list for SSR
    let routes = generate_route_list(App);

    let app = Router::new()
        .merge(edavis::api::routes::api_router(&app_state))
        .leptos_routes(&app_state, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback_service(ServeDir::new(&site_root))
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;

    Ok(())
}

// When compiled for WASM (client-side), there's no main function.
// The hydrate() function in lib.rs handles client-side initialization.
#[cfg(not(feature = "ssr"))]
fn main() {}
