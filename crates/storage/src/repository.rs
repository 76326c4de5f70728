//! Toilet Store Implementation

use crate::{StorageConfig, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Connection, Row, SqlitePool};
use std::str::FromStr;
use toilet_schema::{StoredToilet, ToiletRecord};
use tracing::{debug, info};

const CREATE_TOILETS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS toilets (
        toilet_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        toilet_avail INTEGER NOT NULL,
        handicap_avail INTEGER NOT NULL,
        bidet_avail INTEGER NOT NULL,
        baby_changing_avail INTEGER NOT NULL,
        rating REAL NOT NULL
    )
"#;

const SELECT_TOILET: &str = r#"
    SELECT toilet_id, name, address, latitude, longitude,
           toilet_avail, handicap_avail, bidet_avail, baby_changing_avail, rating
    FROM toilets
    WHERE toilet_id = ?
"#;

/// Handle to the `toilets` table.
///
/// Cheap to clone; all clones share one connection pool. Construct once at
/// startup and call [`ToiletStore::close`] on shutdown.
#[derive(Debug, Clone)]
pub struct ToiletStore {
    pool: SqlitePool,
}

impl ToiletStore {
    /// Open (creating if needed) the database described by `config`
    pub async fn connect(config: &StorageConfig) -> Result<Self, StorageError> {
        let mut options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        // Every pooled connection to `:memory:` is its own database, so keep
        // exactly one and never let it expire.
        let pool = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            options = options.journal_mode(SqliteJournalMode::Wal);
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .connect_with(options)
                .await?
        };

        info!("Opened toilet store at {}", config.url);
        Ok(Self { pool })
    }

    /// Open a fresh in-memory store with the schema applied
    pub async fn in_memory() -> Result<Self, StorageError> {
        let store = Self::connect(&StorageConfig::in_memory()).await?;
        store.migrate().await?;
        Ok(store)
    }

    /// Create the `toilets` table if it does not exist
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TOILETS_TABLE).execute(&self.pool).await?;
        debug!("toilets table ready");
        Ok(())
    }

    /// Round-trip a trivial query to prove the database is reachable
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a toilet row and return it as stored.
    ///
    /// The row is added and committed in a single transaction on a connection
    /// scoped to this call, then re-read by its generated id. The connection
    /// goes back to the pool when it drops, and a transaction that never
    /// reached `commit` is rolled back on drop, so a failed write leaves no row.
    ///
    /// Returns `Ok(None)` if the committed row could not be read back.
    pub async fn insert(&self, record: &ToiletRecord) -> Result<Option<StoredToilet>, StorageError> {
        let mut conn = self.pool.acquire().await?;

        let mut tx = conn.begin().await?;
        let toilet_id = sqlx::query(
            r#"
            INSERT INTO toilets (
                name, address, latitude, longitude,
                toilet_avail, handicap_avail, bidet_avail, baby_changing_avail, rating
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.name.as_str())
        .bind(record.address.as_str())
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(record.toilet_avail)
        .bind(record.handicap_avail)
        .bind(record.bidet_avail)
        .bind(record.baby_changing_avail)
        .bind(record.rating)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
        tx.commit().await?;

        let stored = sqlx::query(SELECT_TOILET)
            .bind(toilet_id)
            .fetch_optional(&mut *conn)
            .await?
            .map(|row| row_to_toilet(&row))
            .transpose()?;

        debug!("Inserted toilet with ID {}", toilet_id);
        Ok(stored)
    }

    /// Fetch a toilet by identifier
    pub async fn get(&self, toilet_id: i64) -> Result<Option<StoredToilet>, StorageError> {
        let row = sqlx::query(SELECT_TOILET)
            .bind(toilet_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row_to_toilet(&row)).transpose()?)
    }

    /// Fetch a toilet that must exist
    pub async fn require(&self, toilet_id: i64) -> Result<StoredToilet, StorageError> {
        self.get(toilet_id).await?.ok_or(StorageError::NotFound)
    }

    /// Get total toilet count
    pub async fn count(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM toilets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Toilet store closed");
    }
}

fn row_to_toilet(row: &SqliteRow) -> Result<StoredToilet, sqlx::Error> {
    Ok(StoredToilet {
        toilet_id: row.try_get("toilet_id")?,
        record: ToiletRecord {
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            toilet_avail: row.try_get("toilet_avail")?,
            handicap_avail: row.try_get("handicap_avail")?,
            bidet_avail: row.try_get("bidet_avail")?,
            baby_changing_avail: row.try_get("baby_changing_avail")?,
            rating: row.try_get("rating")?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn central_plaza() -> ToiletRecord {
        ToiletRecord {
            name: "Central Plaza".to_string(),
            address: "1 Main St".to_string(),
            latitude: 1.30,
            longitude: 103.80,
            toilet_avail: true,
            handicap_avail: true,
            bidet_avail: false,
            baby_changing_avail: true,
            rating: 4.5,
        }
    }

    #[tokio::test]
    async fn test_first_insert_gets_id_one() {
        let store = ToiletStore::in_memory().await.unwrap();

        let stored = store.insert(&central_plaza()).await.unwrap().unwrap();
        assert_eq!(stored.toilet_id, 1);
        assert_eq!(stored.record, central_plaza());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sequential_ids_strictly_increase() {
        let store = ToiletStore::in_memory().await.unwrap();

        let mut ids = Vec::new();
        for i in 0..20 {
            let mut record = central_plaza();
            record.name = format!("Block {}", i);
            ids.push(store.insert(&record).await.unwrap().unwrap().toilet_id);
        }

        assert_eq!(ids[0], 1);
        assert_eq!(ids[1], 2);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let store = ToiletStore::in_memory().await.unwrap();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.insert(&central_plaza()).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().unwrap().toilet_id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_get_round_trips_and_misses() {
        let store = ToiletStore::in_memory().await.unwrap();
        let stored = store.insert(&central_plaza()).await.unwrap().unwrap();

        assert_eq!(store.get(stored.toilet_id).await.unwrap(), Some(stored));
        assert_eq!(store.get(42).await.unwrap(), None);
        assert!(matches!(store.require(42).await, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_row() {
        let store = ToiletStore::in_memory().await.unwrap();
        // Abort after the row has been written but before commit
        sqlx::query(
            r#"
            CREATE TRIGGER abort_insert AFTER INSERT ON toilets
            WHEN NEW.name = 'unreachable'
            BEGIN
                SELECT RAISE(ABORT, 'simulated connection drop');
            END
            "#,
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let mut record = central_plaza();
        record.name = "unreachable".to_string();
        let result = store.insert(&record).await;

        assert!(matches!(result, Err(StorageError::DatabaseError(_))));
        assert_eq!(store.count().await.unwrap(), 0);
        assert_eq!(store.get(1).await.unwrap(), None);

        // The pool is still usable after the failure
        let stored = store.insert(&central_plaza()).await.unwrap().unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(stored.record.name, "Central Plaza");
    }

    #[tokio::test]
    async fn test_insert_without_table_fails() {
        let store = ToiletStore::connect(&StorageConfig::in_memory()).await.unwrap();
        assert!(store.ping().await.is_ok());
        assert!(matches!(
            store.insert(&central_plaza()).await,
            Err(StorageError::DatabaseError(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_store_rejects_writes() {
        let store = ToiletStore::in_memory().await.unwrap();
        store.close().await;
        assert!(store.insert(&central_plaza()).await.is_err());
        assert!(store.ping().await.is_err());
    }

    fn record_strategy() -> impl Strategy<Value = ToiletRecord> {
        (
            "\\PC{0,40}",
            "\\PC{0,60}",
            -1.0e9f64..1.0e9,
            -1.0e9f64..1.0e9,
            any::<[bool; 4]>(),
            -1.0e3f64..1.0e3,
        )
            .prop_map(|(name, address, latitude, longitude, flags, rating)| ToiletRecord {
                name,
                address,
                latitude,
                longitude,
                toilet_avail: flags[0],
                handicap_avail: flags[1],
                bidet_avail: flags[2],
                baby_changing_avail: flags[3],
                rating,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_insert_preserves_fields(record in record_strategy()) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let stored = rt.block_on(async {
                let store = ToiletStore::in_memory().await.unwrap();
                store.insert(&record).await.unwrap().unwrap()
            });
            prop_assert_eq!(stored.toilet_id, 1);
            prop_assert_eq!(stored.record, record);
        }
    }
}
