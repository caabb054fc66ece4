use std::sync::Arc;

use chrono::Utc;

use crate::content::fallback::Fallback;
use crate::content::reader::{bounded, EntityReader, ReaderOptions};
use crate::db::repository::Repository;
use crate::error::AppError;

/// One content type as the application sees it: a cached reader for the
/// public site plus the administrative write path.
///
/// Every successful write invalidates the reader's cache.
pub struct Collection<T: Fallback> {
    repo: Arc<dyn Repository<T>>,
    reader: EntityReader<T>,
    options: ReaderOptions,
}

impl<T: Fallback> Collection<T> {
    pub fn new(repo: Arc<dyn Repository<T>>, options: ReaderOptions) -> Self {
        Self {
            reader: EntityReader::new(Arc::clone(&repo), options.clone()),
            repo,
            options,
        }
    }

    pub fn reader(&self) -> &EntityReader<T> {
        &self.reader
    }

    /// Full listing, cached.
    pub async fn all(&self) -> Result<Arc<Vec<T>>, AppError> {
        self.reader.get_all().await
    }

    /// Single record by id.
    ///
    /// Reads the store directly; if the store fails, the record is looked up
    /// in whatever the reader serves (cache or fallback).
    pub async fn find(&self, id: &str) -> Result<Option<T>, AppError> {
        match bounded(self.options.store_timeout, self.repo.find_by_id(id)).await {
            Ok(found) => Ok(found),
            Err(err) => {
                tracing::warn!(
                    collection = T::COLLECTION,
                    id,
                    error = %err,
                    "Store lookup failed, searching served listing"
                );
                let records = self.reader.get_all().await?;
                Ok(records.iter().find(|r| r.id() == id).cloned())
            }
        }
    }

    pub async fn create(&self, mut record: T) -> Result<T, AppError> {
        record.validate()?;
        if record.id().trim().is_empty() {
            record.set_id(uuid::Uuid::new_v4().to_string());
        }
        record.prepare_insert(Utc::now());

        let created = bounded(self.options.store_timeout, self.repo.insert(record)).await?;
        self.reader.invalidate().await;

        tracing::info!(collection = T::COLLECTION, id = created.id(), "Record created");
        Ok(created)
    }

    /// Returns `None` if no record has the given id.
    pub async fn update(&self, id: &str, mut record: T) -> Result<Option<T>, AppError> {
        record.validate()?;

        let Some(existing) =
            bounded(self.options.store_timeout, self.repo.find_by_id(id)).await?
        else {
            return Ok(None);
        };

        record.set_id(id.to_string());
        record.prepare_update(&existing, Utc::now());

        let updated = bounded(self.options.store_timeout, self.repo.update(id, record)).await?;
        if updated.is_some() {
            self.reader.invalidate().await;
            tracing::info!(collection = T::COLLECTION, id, "Record updated");
        }
        Ok(updated)
    }

    /// Returns `true` if a record was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let removed = bounded(self.options.store_timeout, self.repo.delete(id)).await?;
        if removed {
            self.reader.invalidate().await;
            tracing::info!(collection = T::COLLECTION, id, "Record deleted");
        }
        Ok(removed)
    }
}
