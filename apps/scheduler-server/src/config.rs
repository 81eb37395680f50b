//! Server configuration.

use std::{env, path::PathBuf, str::FromStr};

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// PostgreSQL with an exclusion constraint.
    Postgres,
    /// Embedded SQLite database.
    Sqlite,
    /// Single JSON document on disk.
    File,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            "file" | "json" => Ok(Self::File),
            other => anyhow::bail!("unknown storage backend `{other}`"),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Storage backend.
    pub backend: BackendKind,
    /// Database URL (PostgreSQL or SQLite backends).
    pub database_url: Option<String>,
    /// Document path for the file backend.
    pub data_file: PathBuf,
    /// Connection pool size for the relational backends.
    pub max_connections: u32,
    /// Allowed CORS origins; empty allows any.
    pub cors_origins: Vec<String>,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let backend = match lookup("SCHEDULER_BACKEND") {
            Some(value) => value.parse()?,
            None if database_url.is_some() => BackendKind::Postgres,
            None => BackendKind::File,
        };

        if backend != BackendKind::File && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required for the {backend:?} backend");
        }

        let cors_origins = lookup("SCHEDULER_CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: lookup("SCHEDULER_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("SCHEDULER_SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            backend,
            database_url,
            data_file: lookup("SCHEDULER_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/appointments.json")),
            max_connections: lookup("SCHEDULER_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            cors_origins,
            log_level: lookup("SCHEDULER_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the database URL or an error naming the missing variable.
    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_file_backend() {
        let config = load(&[]).unwrap();

        assert_eq!(config.backend, BackendKind::File);
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.data_file, PathBuf::from("data/appointments.json"));
        assert_eq!(config.max_connections, 5);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/scheduler")]).unwrap();

        assert_eq!(config.backend, BackendKind::Postgres);
        assert_eq!(
            config.require_database_url().unwrap(),
            "postgres://localhost/scheduler"
        );
    }

    #[test]
    fn test_relational_backend_requires_url() {
        assert!(load(&[("SCHEDULER_BACKEND", "sqlite")]).is_err());
        assert!(load(&[("SCHEDULER_BACKEND", "carrier-pigeon")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SCHEDULER_BACKEND", "file"),
            ("DATABASE_URL", "postgres://ignored"),
            ("SCHEDULER_SERVER_PORT", "9000"),
            ("SCHEDULER_CORS_ORIGINS", "http://localhost:5173, ,http://example.com"),
            ("SCHEDULER_DATA_FILE", "/tmp/appts.json"),
        ])
        .unwrap();

        assert_eq!(config.backend, BackendKind::File);
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:5173", "http://example.com"]
        );
        assert_eq!(config.data_file, PathBuf::from("/tmp/appts.json"));
    }
}
