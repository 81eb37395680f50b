//! SQLite backend.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{Appointment, Contact, User};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    FromRow, SqlitePool,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    schema::{SQLITE_OVERLAP_SIGNAL, SQLITE_SCHEMA},
    SchedulingBackend, StoreError, StoreResult,
};

/// Embedded relational backend.
///
/// Double bookings are rejected by the `appointments_no_overlap` trigger.
/// SQLite admits one writer at a time, so the trigger's check and the insert
/// cannot interleave with another insert.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Opens (creating if missing) the database at `url` and applies the
    /// schema.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let backend = Self { pool };
        backend.migrate().await?;
        Ok(backend)
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds a single connection that is never recycled, since the
    /// database lives only as long as that connection.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let backend = Self { pool };
        backend.migrate().await?;
        Ok(backend)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies the schema.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(SQLITE_SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

/// Database row for Appointment.
#[derive(Debug, FromRow)]
struct AppointmentRow {
    id: String,
    user_id: String,
    title: Option<String>,
    description: String,
    contact_name: String,
    contact_email: String,
    start_time: i64,
    end_time: i64,
    date: Option<i64>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = StoreError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: parse_uuid(&row.id)?,
            user_id: parse_uuid(&row.user_id)?,
            title: row.title,
            description: row.description,
            contact: Contact::new(row.contact_name, row.contact_email),
            start_time: from_micros(row.start_time)?,
            end_time: from_micros(row.end_time)?,
            date: row.date.map(from_micros).transpose()?,
        })
    }
}

/// Database row for User.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: parse_uuid(&row.id)?,
            name: row.name,
            email: row.email,
        })
    }
}

fn parse_uuid(value: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| StoreError::CorruptRecord(format!("id `{value}`: {e}")))
}

fn from_micros(value: i64) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(value)
        .ok_or_else(|| StoreError::CorruptRecord(format!("timestamp {value} out of range")))
}

fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.message().contains(SQLITE_OVERLAP_SIGNAL) {
            return StoreError::overlap(None);
        }
    }
    StoreError::Database(err)
}

const APPOINTMENT_COLUMNS: &str = "id, user_id, title, description, contact_name, \
                                   contact_email, start_time, end_time, date";

#[async_trait]
impl SchedulingBackend for SqliteBackend {
    async fn create_appointment(&self, appointment: &Appointment) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO appointments (id, user_id, title, description, contact_name, \
             contact_email, start_time, end_time, date) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(appointment.id.to_string())
        .bind(appointment.user_id.to_string())
        .bind(&appointment.title)
        .bind(&appointment.description)
        .bind(&appointment.contact.name)
        .bind(&appointment.contact.email)
        .bind(appointment.start_time.timestamp_micros())
        .bind(appointment.end_time.timestamp_micros())
        .bind(appointment.date.map(|d| d.timestamp_micros()))
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn get_appointment(&self, id: Uuid) -> StoreResult<Option<Appointment>> {
        let row: Option<AppointmentRow> = sqlx::query_as(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Appointment::try_from).transpose()
    }

    async fn list_appointments_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Appointment>> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE user_id = ? \
             ORDER BY start_time, id"
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn delete_appointment(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, name, email FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    async fn upsert_user(&self, user: &User) -> StoreResult<User> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (id, name, email) VALUES (?, ?, ?) \
             ON CONFLICT (email) DO UPDATE SET name = excluded.name \
             RETURNING id, name, email",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await?;

        let stored = User::try_from(row)?;
        debug!(user_id = %stored.id, "Upserted user");
        Ok(stored)
    }
}
