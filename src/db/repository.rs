use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppError;

/// Sort direction of a collection listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// The key a collection is listed by, e.g. `title` ascending for services.
#[derive(Debug, Clone, Copy)]
pub struct ListOrder {
    /// Stored field name the store sorts on.
    pub field: &'static str,
    pub direction: Direction,
}

impl ListOrder {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Ascending,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: Direction::Descending,
        }
    }

    /// Sort records in memory the way the store would list them.
    pub fn sort<T: Entity>(&self, records: &mut [T]) {
        records.sort_by(|a, b| match self.direction {
            Direction::Ascending => a.cmp_key(b),
            Direction::Descending => b.cmp_key(a),
        });
    }
}

/// A record type persisted in its own collection.
///
/// Implemented by every content record; the store layer and the readers are
/// generic over it.
pub trait Entity:
    Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    /// Collection (table) name in the store.
    const COLLECTION: &'static str;

    /// Listing order used by `Repository::list`.
    const ORDER: ListOrder;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Compare two records on the listing key, ascending.
    fn cmp_key(&self, other: &Self) -> Ordering;

    /// Stamp server-owned fields on a new record.
    fn prepare_insert(&mut self, _now: DateTime<Utc>) {}

    /// Carry over server-owned fields from the stored record on update.
    fn prepare_update(&mut self, _existing: &Self, _now: DateTime<Utc>) {}

    /// Reject records the back-office must not store.
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Data-store client for one entity type.
///
/// "Not found" is a value (`None` / `false`), never an error. Abstracted as a
/// trait so tests and demo mode can run without MongoDB.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// All records, ordered by `T::ORDER`.
    async fn list(&self) -> Result<Vec<T>, AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError>;

    /// Insert a record that already carries its id.
    async fn insert(&self, record: T) -> Result<T, AppError>;

    /// Replace the record with the given id. Returns `None` if it does not exist.
    async fn update(&self, id: &str, record: T) -> Result<Option<T>, AppError>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

/// MongoDB implementation of the Repository.
///
/// This is only available when the `ssr` feature is enabled (i.e., server-side).
#[cfg(feature = "ssr")]
pub struct MongoRepository<T: Entity> {
    collection: mongodb::Collection<T>,
}

#[cfg(feature = "ssr")]
impl<T: Entity> MongoRepository<T> {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(T::COLLECTION),
        }
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl<T: Entity> Repository<T> for MongoRepository<T> {
    async fn list(&self) -> Result<Vec<T>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::{doc, Document};
        use mongodb::options::FindOptions;

        let mut sort = Document::new();
        let direction = match T::ORDER.direction {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        };
        sort.insert(T::ORDER.field, direction);

        let options = FindOptions::builder().sort(sort).build();

        let mut cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(record) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            records.push(record);
        }

        Ok(records)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert(&self, record: T) -> Result<T, AppError> {
        if self.find_by_id(record.id()).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "Record '{}' already exists in {}",
                record.id(),
                T::COLLECTION
            )));
        }

        self.collection
            .insert_one(&record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(record)
    }

    async fn update(&self, id: &str, mut record: T) -> Result<Option<T>, AppError> {
        use mongodb::bson::doc;

        record.set_id(id.to_string());

        let result = self
            .collection
            .replace_one(doc! { "id": id }, &record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        use mongodb::bson::doc;

        let result = self
            .collection
            .delete_one(doc! { "id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}
