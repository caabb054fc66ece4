use std::sync::Arc;

use leptos::prelude::LeptosOptions;

use crate::auth::accounts::AccountDirectory;
use crate::auth::credentials::{ConfiguredCredentials, CredentialProvider};
use crate::auth::session::SessionStore;
use crate::config::{AppConfig, SearchConfig, StoreBackend};
use crate::content::collection::Collection;
use crate::content::fallback::Fallback;
use crate::db::memory::InMemoryRepository;
use crate::db::models::{
    FaqEntry, GovernmentMember, JobPosting, NewsItem, Service, StaffAccount, TreasuryEntry,
};
use crate::db::repository::{MongoRepository, Repository};
use crate::db::settings_repository::{
    InMemorySettingsRepository, MongoSettingsRepository, SettingsRepository,
};
use crate::error::AppError;
use crate::search::aggregator::{SearchAggregator, SearchSource};

/// The backing stores of every content type.
#[derive(Clone)]
pub struct Stores {
    pub services: Arc<dyn Repository<Service>>,
    pub news: Arc<dyn Repository<NewsItem>>,
    pub jobs: Arc<dyn Repository<JobPosting>>,
    pub faq: Arc<dyn Repository<FaqEntry>>,
    pub government: Arc<dyn Repository<GovernmentMember>>,
    pub treasury: Arc<dyn Repository<TreasuryEntry>>,
    pub accounts: Arc<dyn Repository<StaffAccount>>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Stores {
    pub fn mongo(db: &mongodb::Database) -> Self {
        Self {
            services: Arc::new(MongoRepository::<Service>::new(db)),
            news: Arc::new(MongoRepository::<NewsItem>::new(db)),
            jobs: Arc::new(MongoRepository::<JobPosting>::new(db)),
            faq: Arc::new(MongoRepository::<FaqEntry>::new(db)),
            government: Arc::new(MongoRepository::<GovernmentMember>::new(db)),
            treasury: Arc::new(MongoRepository::<TreasuryEntry>::new(db)),
            accounts: Arc::new(MongoRepository::<StaffAccount>::new(db)),
            settings: Arc::new(MongoSettingsRepository::new(db)),
        }
    }

    /// Empty process-local stores.
    pub fn in_memory() -> Self {
        Self {
            services: Arc::new(InMemoryRepository::<Service>::new()),
            news: Arc::new(InMemoryRepository::<NewsItem>::new()),
            jobs: Arc::new(InMemoryRepository::<JobPosting>::new()),
            faq: Arc::new(InMemoryRepository::<FaqEntry>::new()),
            government: Arc::new(InMemoryRepository::<GovernmentMember>::new()),
            treasury: Arc::new(InMemoryRepository::<TreasuryEntry>::new()),
            accounts: Arc::new(InMemoryRepository::<StaffAccount>::new()),
            settings: Arc::new(InMemorySettingsRepository::default()),
        }
    }

    /// Connect to the store named by the configuration.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        match config.store.backend {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory store");
                Ok(Self::in_memory())
            }
            StoreBackend::Mongo => {
                let client = mongodb::Client::with_uri_str(&config.store.mongodb_uri)
                    .await
                    .map_err(|e| AppError::Database(format!("Invalid MongoDB URI: {}", e)))?;
                tracing::info!(
                    database = %config.store.database,
                    "Using MongoDB store at {}",
                    config.store.mongodb_uri
                );
                Ok(Self::mongo(&client.database(&config.store.database)))
            }
        }
    }
}

/// Shared state of the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Collection<Service>>,
    pub news: Arc<Collection<NewsItem>>,
    pub jobs: Arc<Collection<JobPosting>>,
    pub faq: Arc<Collection<FaqEntry>>,
    pub government: Arc<Collection<GovernmentMember>>,
    pub treasury: Arc<Collection<TreasuryEntry>>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub search: Arc<SearchAggregator>,
    pub search_config: SearchConfig,
    pub accounts: Arc<AccountDirectory>,
    pub credentials: Arc<dyn CredentialProvider>,
    pub sessions: Arc<SessionStore>,
    pub leptos_options: LeptosOptions,
}

impl axum::extract::FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

impl AppState {
    pub fn new(stores: Stores, config: &AppConfig, leptos_options: LeptosOptions) -> Self {
        let options = config.reader_options();
        let services = Arc::new(Collection::new(stores.services, options.clone()));
        let news = Arc::new(Collection::new(stores.news, options.clone()));
        let jobs = Arc::new(Collection::new(stores.jobs, options.clone()));
        let faq = Arc::new(Collection::new(stores.faq, options.clone()));

        let search = SearchAggregator::new(vec![
            services.clone() as Arc<dyn SearchSource>,
            news.clone(),
            jobs.clone(),
            faq.clone(),
        ]);

        let mut accounts = config.auth.accounts.clone();
        if config.auth.demo_accounts {
            accounts.extend(ConfiguredCredentials::demo().into_accounts());
        }
        let directory = Arc::new(AccountDirectory::new(
            ConfiguredCredentials::new(accounts),
            stores.accounts,
            options.store_timeout,
        ));
        if !directory.has_configured_accounts() {
            tracing::warn!(
                "No administrator accounts configured, only stored accounts can sign in"
            );
        }

        Self {
            services,
            news,
            jobs,
            faq,
            government: Arc::new(Collection::new(stores.government, options.clone())),
            treasury: Arc::new(Collection::new(stores.treasury, options)),
            settings_repo: stores.settings,
            search: Arc::new(search),
            search_config: config.search.clone(),
            credentials: directory.clone(),
            accounts: directory,
            sessions: Arc::new(SessionStore::new(config.session_ttl())),
            leptos_options,
        }
    }
}

/// Access to the collection of one content type, for handlers generic over it.
pub trait HasCollection<T: Fallback> {
    fn collection(&self) -> &Arc<Collection<T>>;
}

macro_rules! has_collection {
    ($ty:ty, $field:ident) => {
        impl HasCollection<$ty> for AppState {
            fn collection(&self) -> &Arc<Collection<$ty>> {
                &self.$field
            }
        }
    };
}

has_collection!(Service, services);
has_collection!(NewsItem, news);
has_collection!(JobPosting, jobs);
has_collection!(FaqEntry, faq);
has_collection!(GovernmentMember, government);
has_collection!(TreasuryEntry, treasury);
