//! DDL for the relational backends.
//!
//! Every statement is idempotent so the schema can be applied on each start.

/// PostgreSQL schema.
///
/// The exclusion constraint is what rejects double bookings; inserts never
/// pre-check.
pub(crate) const POSTGRES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    CONSTRAINT users_email_key UNIQUE (email)
);

CREATE TABLE IF NOT EXISTS appointments (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL,
    title TEXT,
    description TEXT NOT NULL DEFAULT '',
    contact_name TEXT NOT NULL,
    contact_email TEXT NOT NULL,
    start_time TIMESTAMPTZ NOT NULL,
    end_time TIMESTAMPTZ NOT NULL,
    date TIMESTAMPTZ,
    CONSTRAINT appointments_valid_span CHECK (start_time < end_time),
    CONSTRAINT appointments_no_overlap
        EXCLUDE USING gist (tstzrange(start_time, end_time, '[)') WITH &&)
);

CREATE INDEX IF NOT EXISTS appointments_user_id_idx ON appointments (user_id);
"#;

/// SQLite schema.
///
/// Times are integer microseconds since the Unix epoch. SQLite has no
/// exclusion constraints; the trigger aborts an intersecting insert inside the
/// same write transaction.
pub(crate) const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    title TEXT,
    description TEXT NOT NULL DEFAULT '',
    contact_name TEXT NOT NULL,
    contact_email TEXT NOT NULL,
    start_time INTEGER NOT NULL,
    end_time INTEGER NOT NULL,
    date INTEGER,
    CHECK (start_time < end_time)
);

CREATE INDEX IF NOT EXISTS appointments_user_id_idx ON appointments (user_id);
CREATE INDEX IF NOT EXISTS appointments_start_time_idx ON appointments (start_time);

CREATE TRIGGER IF NOT EXISTS appointments_no_overlap
BEFORE INSERT ON appointments
WHEN EXISTS (
    SELECT 1 FROM appointments
    WHERE start_time < NEW.end_time AND NEW.start_time < end_time
)
BEGIN
    SELECT RAISE(ABORT, 'appointment_overlap');
END;
"#;

/// Abort message raised by the SQLite overlap trigger.
pub(crate) const SQLITE_OVERLAP_SIGNAL: &str = "appointment_overlap";

/// SQLSTATE `exclusion_violation`.
pub(crate) const PG_EXCLUSION_VIOLATION: &str = "23P01";
