//! Backend entry-point: configuration, persistence wiring, HTTP server.

mod server;

use std::net::SocketAddr;

use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use server::ServerConfig;
use userhub::demo_seed::seed_demo_data;
use userhub::inbound::http::health::HealthState;
use userhub::outbound::persistence::{run_pending_migrations, DbPool, PoolConfig};

#[derive(Debug, Parser)]
#[command(name = "userhub", about = "Starter backend serving the users listing")]
struct Cli {
    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// PostgreSQL connection string; omit to run on the in-memory store.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Reset and seed demo users and posts at startup.
    #[arg(long)]
    seed_demo_data: bool,
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

    let cli = Cli::parse();

    let mut config = ServerConfig::new(cli.bind);
    if let Some(database_url) = &cli.database_url {
        run_pending_migrations(database_url).map_err(std::io::Error::other)?;

        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        if cli.seed_demo_data {
            seed_demo_data(&pool).await.map_err(std::io::Error::other)?;
        }
        config = config.with_db_pool(pool);
    } else if cli.seed_demo_data {
        warn!("--seed-demo-data ignored: no database URL configured");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    server.await
}
