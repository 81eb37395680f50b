//! PostgreSQL backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{Appointment, Contact, User};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::{
    schema::{PG_EXCLUSION_VIOLATION, POSTGRES_SCHEMA},
    SchedulingBackend, StoreError, StoreResult,
};

/// Durable relational backend.
///
/// Overlap is enforced by the `appointments_no_overlap` exclusion constraint,
/// so the guarantee holds under PostgreSQL's own concurrency control with no
/// application-level locking. Each operation is a single statement.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Connects to the database at `url`. The schema is not applied.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        Ok(Self { pool })
    }

    /// Applies the schema.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(POSTGRES_SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

/// Database row for Appointment.
#[derive(Debug, FromRow)]
struct AppointmentRow {
    id: Uuid,
    user_id: Uuid,
    title: Option<String>,
    description: String,
    contact_name: String,
    contact_email: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    date: Option<DateTime<Utc>>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            contact: Contact::new(row.contact_name, row.contact_email),
            start_time: row.start_time,
            end_time: row.end_time,
            date: row.date,
        }
    }
}

/// Database row for User.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

/// Translates the exclusion violation, and only that, into a conflict.
fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(PG_EXCLUSION_VIOLATION) {
            return StoreError::overlap(None);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl SchedulingBackend for PostgresBackend {
    async fn create_appointment(&self, appointment: &Appointment) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO appointments (id, user_id, title, description, contact_name, \
             contact_email, start_time, end_time, date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(appointment.id)
        .bind(appointment.user_id)
        .bind(&appointment.title)
        .bind(&appointment.description)
        .bind(&appointment.contact.name)
        .bind(&appointment.contact.email)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(appointment.date)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn get_appointment(&self, id: Uuid) -> StoreResult<Option<Appointment>> {
        let row: Option<AppointmentRow> = sqlx::query_as(
            "SELECT id, user_id, title, description, contact_name, contact_email, \
             start_time, end_time, date FROM appointments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Appointment::from))
    }

    async fn list_appointments_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Appointment>> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(
            "SELECT id, user_id, title, description, contact_name, contact_email, \
             start_time, end_time, date FROM appointments WHERE user_id = $1 \
             ORDER BY start_time, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn delete_appointment(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, name, email FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(User::from))
    }

    async fn upsert_user(&self, user: &User) -> StoreResult<User> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (id, name, email) VALUES ($1, $2, $3) \
             ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name, email",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = %row.id, "Upserted user");
        Ok(User::from(row))
    }
}

// These run only when `TEST_DATABASE_URL` points at a PostgreSQL instance.
// Appointments are global, so every test books inside its own far-future
// window to stay clear of the others.
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::{BookingRequest, SchedulingStore};

    async fn test_store() -> Option<SchedulingStore<PostgresBackend>> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let backend = PostgresBackend::connect(&url, 5).await.unwrap();
        backend.migrate().await.unwrap();
        Some(SchedulingStore::new(backend))
    }

    fn window() -> DateTime<Utc> {
        let offset = (Uuid::new_v4().as_u128() % 1_000_000) as i64;
        Utc.with_ymd_and_hms(2200, 1, 1, 0, 0, 0).unwrap() + Duration::hours(offset * 24)
    }

    fn booking(email: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> BookingRequest {
        BookingRequest::new(Contact::new("Pg User", email), start, end)
    }

    #[tokio::test]
    async fn test_exclusion_constraint_rejects_overlap() {
        let Some(store) = test_store().await else {
            return;
        };
        let base = window();
        let email = format!("{}@example.com", Uuid::new_v4());

        store
            .book(booking(&email, base, base + Duration::hours(1)))
            .await
            .unwrap();

        let err = store
            .book(booking(
                &email,
                base + Duration::minutes(30),
                base + Duration::minutes(90),
            ))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(err.to_string().contains("conflict"));

        store
            .book(booking(
                &email,
                base + Duration::hours(1),
                base + Duration::hours(2),
            ))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_user_and_delete() {
        let Some(store) = test_store().await else {
            return;
        };
        let email = format!("{}@example.com", Uuid::new_v4());

        assert!(store.users().find(&email).await.unwrap().is_none());

        let first = store.users().find_or_create(&email, "A").await.unwrap();
        let second = store.users().find_or_create(&email, "B").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "B");

        let base = window();
        let created = store
            .book(booking(&email, base, base + Duration::minutes(15)))
            .await
            .unwrap();
        assert_eq!(created.user_id, first.id);
        assert_eq!(store.list_by_user(first.id).await.unwrap().len(), 1);

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.get(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_only_one_wins() {
        let Some(store) = test_store().await else {
            return;
        };
        let store = Arc::new(store);
        let base = window();

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .book(booking(
                        &format!("racer{i}-{}@example.com", Uuid::new_v4()),
                        base,
                        base + Duration::hours(1),
                    ))
                    .await
            }));
        }

        let mut wins = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => wins += 1,
                Err(err) => assert!(err.is_conflict(), "unexpected error: {err}"),
            }
        }
        assert_eq!(wins, 1);
    }
}
