//! Registration storage.
//!
//! Registrations go to SQLite when a database is reachable at startup.
//! Otherwise they are kept in a process-local list that is lost on
//! restart.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tokio::sync::RwLock;

use taller_core::Registration;

const SQL_CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS registrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    created_at TEXT NOT NULL
)
"#;

const SQL_INSERT: &str = r#"
INSERT INTO registrations (first_name, last_name, email, phone, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const SQL_LIST: &str = r#"
SELECT first_name, last_name, email, phone, created_at
FROM registrations
ORDER BY created_at DESC, id DESC
"#;

#[derive(sqlx::FromRow)]
struct RegistrationRow {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Registration {
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub enum RegistrationStore {
    Database(SqlitePool),
    /// Newest first
    Memory(Arc<RwLock<Vec<Registration>>>),
}

impl RegistrationStore {
    pub fn memory() -> Self {
        RegistrationStore::Memory(Arc::default())
    }

    /// Open the database at `url`, falling back to memory when there is
    /// no URL or the database cannot be opened.
    pub async fn connect(url: Option<&str>) -> Self {
        let Some(url) = url else {
            tracing::warn!("DATABASE_URL not set, registrations are kept in memory only");
            return Self::memory();
        };

        match Self::open(url).await {
            Ok(store) => {
                tracing::info!(url, "database connected");
                store
            }
            Err(e) => {
                tracing::error!(url, error = %e, "database unavailable, registrations are kept in memory only");
                Self::memory()
            }
        }
    }

    async fn open(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;
        sqlx::query(SQL_CREATE_TABLE).execute(&pool).await?;
        Ok(RegistrationStore::Database(pool))
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, RegistrationStore::Database(_))
    }

    /// Store a registration. Returns `true` when it was saved durably.
    pub async fn insert(&self, registration: &Registration) -> Result<bool> {
        match self {
            RegistrationStore::Database(pool) => {
                sqlx::query(SQL_INSERT)
                    .bind(&registration.first_name)
                    .bind(&registration.last_name)
                    .bind(&registration.email)
                    .bind(&registration.phone)
                    .bind(registration.created_at)
                    .execute(pool)
                    .await?;
                Ok(true)
            }
            RegistrationStore::Memory(items) => {
                items.write().await.insert(0, registration.clone());
                Ok(false)
            }
        }
    }

    /// All registrations, newest first.
    pub async fn list(&self) -> Result<Vec<Registration>> {
        match self {
            RegistrationStore::Database(pool) => {
                let rows = sqlx::query_as::<_, RegistrationRow>(SQL_LIST)
                    .fetch_all(pool)
                    .await?;
                Ok(rows.into_iter().map(Registration::from).collect())
            }
            RegistrationStore::Memory(items) => Ok(items.read().await.clone()),
        }
    }
}
