//! `PostgreSQL`-backed [`AttendeeStore`].
//!
//! Expects an `attendees` table:
//!
//! ```sql
//! CREATE TABLE attendees (
//!     id         SERIAL PRIMARY KEY,
//!     name       TEXT NOT NULL,
//!     email      TEXT NOT NULL,
//!     event_id   UUID NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     UNIQUE (event_id, email)
//! );
//! ```
//!
//! Schema management is left to the deployment.

use chrono::{DateTime, Utc};
use pass_in_core::{Attendee, AttendeeChanges, AttendeeId, AttendeeStore, EventId, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

const SQL_FIND_BY_EVENT_AND_ID: &str = r"
    SELECT id, event_id, name, email, created_at
    FROM attendees
    WHERE event_id = $1 AND id = $2
";

const SQL_UPDATE_BY_ID: &str = r"
    UPDATE attendees
    SET name = $2, email = $3, created_at = $4
    WHERE id = $1
    RETURNING id, event_id, name, email, created_at
";

#[derive(Debug, sqlx::FromRow)]
struct AttendeeRow {
    id: i32,
    event_id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl From<AttendeeRow> for Attendee {
    fn from(row: AttendeeRow) -> Self {
        Self {
            id: AttendeeId::new(row.id),
            event_id: EventId::from_uuid(row.event_id),
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

fn database_error(operation: &'static str, error: &sqlx::Error) -> StoreError {
    metrics::counter!("attendee_store.errors", "operation" => operation).increment(1);
    StoreError::Database(error.to_string())
}

/// Attendee store over a `PostgreSQL` connection pool.
///
/// # Example
///
/// ```no_run
/// use pass_in_postgres::PostgresAttendeeStore;
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let store = PostgresAttendeeStore::new("postgres://localhost/pass_in").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PostgresAttendeeStore {
    pool: PgPool,
}

impl PostgresAttendeeStore {
    /// Connect to `database_url` with a default pool.
    ///
    /// # Errors
    ///
    /// Returns the connection error if the database is unreachable.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl AttendeeStore for PostgresAttendeeStore {
    #[tracing::instrument(skip(self), fields(store = "postgres"))]
    async fn find_by_event_and_id(
        &self,
        event_id: EventId,
        id: AttendeeId,
    ) -> Result<Option<Attendee>, StoreError> {
        metrics::counter!("attendee_store.queries", "operation" => "find_by_event_and_id")
            .increment(1);

        let row: Option<AttendeeRow> = sqlx::query_as(SQL_FIND_BY_EVENT_AND_ID)
            .bind(event_id.as_uuid())
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("find_by_event_and_id", &e))?;

        Ok(row.map(Attendee::from))
    }

    #[tracing::instrument(skip(self, changes), fields(store = "postgres"))]
    async fn update_by_id(
        &self,
        id: AttendeeId,
        changes: &AttendeeChanges,
    ) -> Result<Attendee, StoreError> {
        metrics::counter!("attendee_store.queries", "operation" => "update_by_id").increment(1);

        let row: Option<AttendeeRow> = sqlx::query_as(SQL_UPDATE_BY_ID)
            .bind(id.value())
            .bind(&changes.name)
            .bind(&changes.email)
            .bind(changes.created_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("update_by_id", &e))?;

        row.map(Attendee::from).ok_or(StoreError::NotFound(id))
    }
}
