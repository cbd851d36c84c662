//! PostgreSQL implementation of the message store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::MessageRow;
use super::{MessageStore, StatusUpdate};
use crate::config::AppConfig;
use crate::domain::{
    ContactMessage, MessageId, StatusChange, StatusFilter, TransitionPolicy, stored_now,
};
use crate::error::PortfolioError;

const SELECT_COLUMNS: &str = "SELECT id, name, email, subject, message, availability_preference, \
     status, submitted_at, updated_at, version, ip_address FROM contact_messages";

/// PostgreSQL-backed message store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresMessageStore {
    pool: PgPool,
}

impl PostgresMessageStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool from configuration and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Unavailable`] if the database cannot be
    /// reached or a migration fails.
    pub async fn connect(config: &AppConfig) -> Result<Self, PortfolioError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| PortfolioError::Unavailable(format!("migration failed: {e}")))?;

        tracing::info!(
            max_connections = config.database_max_connections,
            "connected to PostgreSQL"
        );
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn insert(&self, message: ContactMessage) -> Result<(), PortfolioError> {
        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, subject, message, \
             availability_preference, status, submitted_at, updated_at, version, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(*message.id.as_uuid())
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.availability_preference.map(|a| a.as_str()))
        .bind(message.status.as_str())
        .bind(message.submitted_at)
        .bind(message.updated_at)
        .bind(message.version)
        .bind(&message.ip_address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: MessageId) -> Result<ContactMessage, PortfolioError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(PortfolioError::MessageNotFound(id))?;

        row.try_into()
    }

    async fn list(&self, filter: StatusFilter) -> Result<Vec<ContactMessage>, PortfolioError> {
        let rows = if let Some(status) = filter.status() {
            sqlx::query_as::<_, MessageRow>(&format!(
                "{SELECT_COLUMNS} WHERE status = $1 ORDER BY submitted_at DESC, id ASC"
            ))
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, MessageRow>(&format!(
                "{SELECT_COLUMNS} ORDER BY submitted_at DESC, id ASC"
            ))
            .fetch_all(&self.pool)
            .await
        }?;

        rows.into_iter().map(ContactMessage::try_from).collect()
    }

    async fn update_status(
        &self,
        id: MessageId,
        change: StatusChange,
        policy: TransitionPolicy,
    ) -> Result<StatusUpdate, PortfolioError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1 FOR UPDATE"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PortfolioError::MessageNotFound(id))?;

        let mut message = ContactMessage::try_from(row)?;
        let previous = message.status;
        let changed = message.apply_status(&change, policy, stored_now())?;

        if changed {
            sqlx::query(
                "UPDATE contact_messages SET status = $1, updated_at = $2, version = $3 \
                 WHERE id = $4",
            )
            .bind(message.status.as_str())
            .bind(message.updated_at)
            .bind(message.version)
            .bind(*id.as_uuid())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(StatusUpdate {
            message,
            previous,
            changed,
        })
    }

    async fn remove(&self, id: MessageId) -> Result<ContactMessage, PortfolioError> {
        let row = sqlx::query_as::<_, MessageRow>(
            "DELETE FROM contact_messages WHERE id = $1 RETURNING id, name, email, subject, \
             message, availability_preference, status, submitted_at, updated_at, version, \
             ip_address",
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PortfolioError::MessageNotFound(id))?;

        row.try_into()
    }

    async fn count(&self) -> Result<u64, PortfolioError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), PortfolioError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
