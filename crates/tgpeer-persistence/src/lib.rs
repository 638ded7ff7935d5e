//! Peer store backed by SQLite
//!
//! The store is the single writer for canonical user records: every update
//! goes through a read-merge-write cycle under one lock, so at most one merge
//! per peer is in flight.

pub mod error;

pub use error::{Result, StoreError};

use chrono::Utc;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};
use sqlx::{Executor, Row};
use tgpeer_types::{PeerId, TelegramUser, WireUser};
use tgpeer_users::{merge_users, merge_wire_user};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Persistence service for canonical peer records
pub struct PeerStore {
    pool: SqlitePool,
    write_lock: Mutex<()>,
}

impl PeerStore {
    /// Open (or create) a store at the given database path
    pub async fn new(database_path: &str) -> Result<Self> {
        let database_url = format!("sqlite:{}?mode=rwc", database_path);
        let pool = SqlitePool::connect(&database_url).await?;

        let store = Self::from_pool(pool).await?;
        info!("Peer store initialized with database: {}", database_path);
        Ok(store)
    }

    /// Store living only in memory, used by tests
    pub async fn in_memory() -> Result<Self> {
        // every pooled connection gets its own memory database, so the single
        // connection must never be recycled
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self {
            pool,
            write_lock: Mutex::new(()),
        };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS peers (
                peer_id TEXT PRIMARY KEY,
                namespace TEXT NOT NULL,
                record TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_peers_namespace ON peers(namespace);
            "#,
        )
        .execute(&self.pool)
        .await?;

        debug!("Database migrations completed");
        Ok(())
    }

    /// Load the stored record for a peer
    pub async fn get_user(&self, peer_id: &PeerId) -> Result<Option<TelegramUser>> {
        load_user(&self.pool, peer_id).await
    }

    /// Store a record as is, replacing whatever was there
    pub async fn put_user(&self, user: &TelegramUser) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        save_user(&self.pool, user).await
    }

    /// Fold a batch of wire objects into the store
    ///
    /// The batch runs in one transaction. Objects for the same peer are
    /// applied in order, each seeing the result of the previous one. Returns
    /// the resulting record for every input object.
    pub async fn apply_wire_users(&self, users: &[WireUser]) -> Result<Vec<TelegramUser>> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;
        let mut merged = Vec::with_capacity(users.len());

        for user in users {
            let peer_id = user.peer_id();
            let cached = load_user(&mut *tx, &peer_id).await?;
            let record = merge_wire_user(cached.as_ref(), user);
            save_user(&mut *tx, &record).await?;
            merged.push(record);
        }

        tx.commit().await?;
        info!("Applied {} wire users", merged.len());
        Ok(merged)
    }

    /// Reconcile a canonical record with the stored copy and persist the result
    pub async fn merge_user(&self, fresh: &TelegramUser) -> Result<TelegramUser> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let base = load_user(&mut *tx, &fresh.id).await?;
        let record = merge_users(base.as_ref(), fresh);
        save_user(&mut *tx, &record).await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Number of stored users
    pub async fn user_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM peers WHERE namespace = 'user'")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }
}

async fn load_user<'e, E>(executor: E, peer_id: &PeerId) -> Result<Option<TelegramUser>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let key = peer_id.to_string();
    let row = sqlx::query("SELECT record FROM peers WHERE peer_id = ?")
        .bind(&key)
        .fetch_optional(executor)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let raw: String = row.try_get("record")?;
    let user: TelegramUser = serde_json::from_str(&raw)?;
    if user.id != *peer_id {
        return Err(StoreError::Corrupt {
            peer_id: key,
            details: format!("record carries id {}", user.id),
        });
    }

    Ok(Some(user))
}

async fn save_user<'e, E>(executor: E, user: &TelegramUser) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let record = serde_json::to_string(user)?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO peers (peer_id, namespace, record, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user.id.to_string())
    .bind(user.id.namespace.as_str())
    .bind(record)
    .bind(Utc::now().to_rfc3339())
    .execute(executor)
    .await?;

    Ok(())
}
