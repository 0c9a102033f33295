// src/main.rs

use sqlx::PgPool;
use tokio::net::TcpListener;

mod config;
mod db;
mod error;
mod extract;
mod logging;
mod models;
mod planning;
mod routes;

use crate::config::Config;
use crate::planning::PlanningDefaults;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub planning: PlanningDefaults,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from .env if present
    dotenvy::dotenv().ok();
    logging::init();

    let cfg = Config::from_env()?;

    let pool = db::connect(&cfg).await?;
    if cfg.run_migrations {
        db::migrate(&pool).await?;
    }

    let app = routes::router(AppState { pool, planning: cfg.planning });

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, defaults = ?cfg.planning, "manpower planning API listening");

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
