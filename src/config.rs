//! Layered application configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. a TOML file (`edavis.toml`, or the path in `EDAVIS_CONFIG`), if present
//! 3. environment variables prefixed `EDAVIS__`, nested with `__`
//!    (e.g. `EDAVIS__STORE__MONGODB_URI`)

use std::time::Duration;

use serde::Deserialize;

use crate::auth::credentials::Account;
use crate::content::reader::ReaderOptions;
use crate::error::AppError;
use crate::models::search::ResultKind;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub content: ContentConfig,
    pub search: SearchConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Overrides the Leptos `site-addr` when set.
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub mongodb_uri: String,
    pub database: String,
    /// Upper bound for one store call.
    pub timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongo,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database: "edavis".to_string(),
            timeout_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Cache lifetime of a listing. Unset keeps it until the next write.
    pub cache_ttl_secs: Option<u64>,
    /// Serve static records when the store is unreachable.
    pub use_fallback: bool,
    /// Seed empty collections with the demo records on startup.
    pub seed_demo: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: None,
            use_fallback: true,
            seed_demo: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results kept per kind by `GET /api/search`.
    pub endpoint_limit: usize,
    /// Results the assistant widget receives in total.
    pub widget_limit: usize,
    /// Sources `GET /api/search` queries when the request names none.
    pub endpoint_sources: Vec<ResultKind>,
    /// Sources `GET /api/search/widget` queries.
    pub widget_sources: Vec<ResultKind>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint_limit: 3,
            widget_limit: 5,
            endpoint_sources: vec![ResultKind::Services, ResultKind::News, ResultKind::Jobs],
            widget_sources: ResultKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub session_ttl_secs: u64,
    /// Add the built-in demo accounts (one per role).
    pub demo_accounts: bool,
    pub accounts: Vec<Account>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: 8 * 60 * 60,
            demo_accounts: false,
            accounts: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load from the default file location and the environment.
    pub fn load() -> Result<Self, AppError> {
        let path = std::env::var("EDAVIS_CONFIG").unwrap_or_else(|_| "edavis.toml".to_string());
        Self::load_from(&path)
    }

    /// Load from an explicit file path and the environment.
    pub fn load_from(path: &str) -> Result<Self, AppError> {
        let settings = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix("EDAVIS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to read configuration: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| AppError::Internal(format!("Invalid configuration: {}", e)))
    }

    pub fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            cache_ttl: self.content.cache_ttl_secs.map(Duration::from_secs),
            store_timeout: Duration::from_millis(self.store.timeout_ms),
            use_fallback: self.content.use_fallback,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.auth.session_ttl_secs)
    }
}
