//! Toilet Service
//!
//! The write path from a validated record to a committed row.

use async_trait::async_trait;
use storage::{StorageError, ToiletStore};
use toilet_schema::{StoredToilet, ToiletCreate};

/// Anything that can persist a new toilet.
///
/// `Ok(None)` means the write completed without producing an entity.
#[async_trait]
pub trait ToiletWriter: Send + Sync {
    async fn create(&self, toilet: &ToiletCreate) -> Result<Option<StoredToilet>, StorageError>;
}

/// Service backed by the SQLite toilet store
#[derive(Debug, Clone)]
pub struct ToiletService {
    store: ToiletStore,
}

impl ToiletService {
    pub fn new(store: ToiletStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToiletWriter for ToiletService {
    /// Store failures propagate untouched.
    async fn create(&self, toilet: &ToiletCreate) -> Result<Option<StoredToilet>, StorageError> {
        self.store.insert(&toilet.record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toilet_schema::ToiletRecord;

    fn toilet(name: &str) -> ToiletCreate {
        ToiletRecord {
            name: name.to_string(),
            address: "1 Main St".to_string(),
            latitude: 1.30,
            longitude: 103.80,
            toilet_avail: true,
            handicap_avail: true,
            bidet_avail: false,
            baby_changing_avail: true,
            rating: 4.5,
        }
        .into()
    }

    #[tokio::test]
    async fn test_create_returns_committed_entity() {
        let store = ToiletStore::in_memory().await.unwrap();
        let service = ToiletService::new(store.clone());

        let created = service.create(&toilet("Central Plaza")).await.unwrap().unwrap();
        assert_eq!(created.toilet_id, 1);
        assert_eq!(created.record, toilet("Central Plaza").record);

        // Visible through an independent read once create returns
        assert_eq!(store.get(1).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let service = ToiletService::new(ToiletStore::in_memory().await.unwrap());

        let first = service.create(&toilet("North")).await.unwrap().unwrap();
        let second = service.create(&toilet("South")).await.unwrap().unwrap();
        assert_eq!((first.toilet_id, second.toilet_id), (1, 2));
    }

    #[tokio::test]
    async fn test_create_propagates_store_failure() {
        let store = ToiletStore::in_memory().await.unwrap();
        store.close().await;
        let service = ToiletService::new(store);

        assert!(matches!(
            service.create(&toilet("Central Plaza")).await,
            Err(StorageError::DatabaseError(_))
        ));
    }
}
