use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Portal-wide settings stored as a single document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSettings {
    /// Settings document key (always "global").
    #[serde(default = "global_key")]
    pub key: String,
    /// Where the "ask a question" button on service pages points to.
    #[serde(default)]
    pub question_link: Option<String>,
}

fn global_key() -> String {
    "global".to_string()
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            key: global_key(),
            question_link: None,
        }
    }
}

/// Repository trait for portal settings.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Get the global settings, or defaults if none were saved yet.
    async fn get_settings(&self) -> Result<PortalSettings, AppError>;

    /// Update the question link. An empty link clears it.
    async fn set_question_link(&self, link: Option<&str>) -> Result<PortalSettings, AppError>;
}

fn normalize_link(link: Option<&str>) -> Option<String> {
    link.map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

/// MongoDB implementation of the SettingsRepository.
#[cfg(feature = "ssr")]
pub struct MongoSettingsRepository {
    collection: mongodb::Collection<PortalSettings>,
}

#[cfg(feature = "ssr")]
impl MongoSettingsRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("portal_settings"),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl SettingsRepository for MongoSettingsRepository {
    async fn get_settings(&self) -> Result<PortalSettings, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .find_one(doc! { "key": "global" })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.unwrap_or_default())
    }

    async fn set_question_link(&self, link: Option<&str>) -> Result<PortalSettings, AppError> {
        use mongodb::bson::{doc, Bson};
        use mongodb::options::UpdateOptions;

        let link = normalize_link(link);
        let stored = match &link {
            Some(l) => Bson::String(l.clone()),
            None => Bson::Null,
        };

        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(
                doc! { "key": "global" },
                doc! { "$set": { "key": "global", "question_link": stored } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(PortalSettings {
            key: global_key(),
            question_link: link,
        })
    }
}

/// Process-local settings used for demo mode and tests.
#[derive(Default)]
pub struct InMemorySettingsRepository {
    settings: RwLock<PortalSettings>,
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn get_settings(&self) -> Result<PortalSettings, AppError> {
        self.settings
            .read()
            .map(|s| s.clone())
            .map_err(|_| AppError::Internal("settings lock poisoned".into()))
    }

    async fn set_question_link(&self, link: Option<&str>) -> Result<PortalSettings, AppError> {
        let mut settings = self
            .settings
            .write()
            .map_err(|_| AppError::Internal("settings lock poisoned".into()))?;
        settings.question_link = normalize_link(link);
        Ok(settings.clone())
    }
}
