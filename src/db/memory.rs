use std::sync::RwLock;

use async_trait::async_trait;

use crate::db::repository::{Entity, Repository};
use crate::error::AppError;

/// Process-local repository used for demo mode and tests.
pub struct InMemoryRepository<T: Entity> {
    records: RwLock<Vec<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn poisoned() -> AppError {
        AppError::Internal(format!("{} store lock poisoned", T::COLLECTION))
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn list(&self) -> Result<Vec<T>, AppError> {
        let mut records = self.records.read().map_err(|_| Self::poisoned())?.clone();
        T::ORDER.sort(&mut records);
        Ok(records)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError> {
        Ok(self
            .records
            .read()
            .map_err(|_| Self::poisoned())?
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn insert(&self, record: T) -> Result<T, AppError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(AppError::BadRequest(format!(
                "Record '{}' already exists in {}",
                record.id(),
                T::COLLECTION
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, mut record: T) -> Result<Option<T>, AppError> {
        record.set_id(id.to_string());

        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        match records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut records = self.records.write().map_err(|_| Self::poisoned())?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::FaqEntry;
    use chrono::{TimeZone, Utc};

    fn faq(id: &str, day: u32) -> FaqEntry {
        let at = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        FaqEntry {
            id: id.to_string(),
            question: format!("Question {id}"),
            answer: "Answer".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn test_list_applies_entity_order() {
        let repo = InMemoryRepository::with_records(vec![faq("old", 1), faq("new", 20)]);
        let listed = repo.list().await.unwrap();
        // FAQ is listed newest first
        assert_eq!(listed[0].id, "new");
        assert_eq!(listed[1].id, "old");
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let repo = InMemoryRepository::new();
        repo.insert(faq("1", 1)).await.unwrap();
        let result = repo.insert(faq("1", 2)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_values() {
        let repo: InMemoryRepository<FaqEntry> = InMemoryRepository::new();
        assert!(repo.update("nope", faq("nope", 1)).await.unwrap().is_none());
        assert!(!repo.delete("nope").await.unwrap());
        assert!(repo.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_keeps_path_id() {
        let repo = InMemoryRepository::with_records(vec![faq("1", 1)]);
        let mut changed = faq("other", 1);
        changed.answer = "Updated".to_string();

        let updated = repo.update("1", changed).await.unwrap().unwrap();
        assert_eq!(updated.id, "1");
        assert_eq!(repo.find_by_id("1").await.unwrap().unwrap().answer, "Updated");
    }
}
