//! Appointment scheduler server binary.

use appointment_store::{FileBackend, PostgresBackend, SqliteBackend};
use scheduler_server::{
    config::{BackendKind, Config},
    init_tracing, serve,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = ?config.backend,
        "Starting appointment scheduler"
    );

    match config.backend {
        BackendKind::Postgres => {
            let url = config.require_database_url()?;
            let backend = PostgresBackend::connect(url, config.max_connections).await?;
            tracing::info!("Applying PostgreSQL schema");
            backend.migrate().await?;
            serve(config, backend).await
        }
        BackendKind::Sqlite => {
            let url = config.require_database_url()?;
            let backend = SqliteBackend::connect(url, config.max_connections).await?;
            serve(config, backend).await
        }
        BackendKind::File => {
            tracing::info!(path = %config.data_file.display(), "Using JSON file storage");
            let backend = FileBackend::new(&config.data_file);
            serve(config, backend).await
        }
    }
}
