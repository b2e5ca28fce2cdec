//! Backend entry-point: wires REST endpoints and OpenAPI docs.

use std::env;
use std::net::SocketAddr;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{ServerConfig, run};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("running migrations failed: {e}")))?;
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    // Migrations use a synchronous connection; keep them off the runtime.
    let migration_url = database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&migration_url))
        .await
        .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))??;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    run(ServerConfig::new(bind_addr, pool))?.await
}
