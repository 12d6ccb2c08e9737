//! SQLite implementation of [`ContactStore`] using sqlx.

use super::ContactStore;
use crate::error::StoreResult;
use crate::models::{Contact, InsertOutcome, NewContact};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    /// Open (creating if missing) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.initialize_tables().await?;
        tracing::info!(path = %path.display(), "contact store opened");
        Ok(store)
    }

    /// A private in-memory database. Held on a single connection that is never
    /// recycled, since every new SQLite memory connection starts out empty.
    pub async fn in_memory() -> StoreResult<Self> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.initialize_tables().await?;
        Ok(store)
    }

    async fn initialize_tables(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                phone TEXT NOT NULL,
                country_code TEXT NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (country_code, phone)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_contacts_created_at
            ON contacts(created_at DESC, id DESC)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn insert(&self, contact: NewContact) -> StoreResult<InsertOutcome> {
        // DO NOTHING only covers the unique key; any other failure is still an error.
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO contacts (name, phone, country_code, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (country_code, phone) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.country_code)
        .bind(contact.created_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match id {
            Some(id) => InsertOutcome::Inserted { id },
            None => InsertOutcome::Duplicate,
        })
    }

    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, name, phone, country_code, created_at
            FROM contacts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(contacts)
    }

    async fn exists(&self, country_code: &str, phone: &str) -> StoreResult<bool> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM contacts WHERE country_code = ? AND phone = ?")
                .bind(country_code)
                .bind(phone)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }
}
