use std::sync::Arc;

use crate::content::fallback::{demo_government, demo_treasury, Fallback};
use crate::db::models::{FaqEntry, JobPosting, NewsItem, Service};
use crate::db::repository::{Entity, Repository};
use crate::state::Stores;

/// Fill empty collections with the demo records.
///
/// Collections that already hold data are left untouched. Failures are
/// logged and do not stop the server from starting.
pub async fn seed_demo_data(stores: &Stores) {
    tracing::info!("Starting demo data seeding...");

    seed_collection(&stores.services, Service::fallback()).await;
    seed_collection(&stores.news, NewsItem::fallback()).await;
    seed_collection(&stores.jobs, JobPosting::fallback()).await;
    seed_collection(&stores.faq, FaqEntry::fallback()).await;
    seed_collection(&stores.government, demo_government()).await;
    seed_collection(&stores.treasury, demo_treasury()).await;

    tracing::info!("Demo data seeding complete.");
}

async fn seed_collection<T: Entity>(repo: &Arc<dyn Repository<T>>, records: Vec<T>) {
    match repo.list().await {
        Ok(existing) if !existing.is_empty() => {
            tracing::info!(
                "Collection '{}' already has {} records, skipping.",
                T::COLLECTION,
                existing.len()
            );
            return;
        }
        Err(e) => {
            tracing::error!("Failed to check collection '{}': {}", T::COLLECTION, e);
            return;
        }
        Ok(_) => {}
    }

    let total = records.len();
    let mut inserted = 0;
    for record in records {
        let id = record.id().to_string();
        match repo.insert(record).await {
            Ok(_) => inserted += 1,
            Err(e) => tracing::error!("Failed to seed '{}' in '{}': {}", id, T::COLLECTION, e),
        }
    }
    tracing::info!("Seeded {}/{} records into '{}'.", inserted, total, T::COLLECTION);
}
