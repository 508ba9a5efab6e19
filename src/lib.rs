pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod schema;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, put},
    Extension, Router,
};

use crate::config::Config;
use crate::db::{Database, SharedRepository};
use crate::routes::ingredients;

pub fn create_app(db: SharedRepository) -> Router {
    Router::new()
        .route("/ingredients", get(ingredients::get).post(ingredients::create))
        .route(
            "/ingredients/:id",
            put(ingredients::update).delete(ingredients::delete),
        )
        .layer(Extension(db))
}

pub async fn run_app(config: Config) -> Result<()> {
    let repository = Database::initialize(&config.database)
        .await
        .context("Failed to initialize database")?;
    let app = create_app(Arc::new(repository));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
