// health.rs
//! Liveness endpoint for the hosting platform. Never touches bot state.
use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::net::TcpListener;

use crate::constants::LIVENESS_BODY;

pub fn router() -> Router {
    Router::new().route("/", get(|| async { LIVENESS_BODY }))
}

/// Serve the liveness route until the process exits
pub async fn serve(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "liveness server listening");
    axum::serve(listener, router()).await
}
