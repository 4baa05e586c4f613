use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::App;
use crate::handler::AppState;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod routes;
pub mod validate;

/// CORS restricted to the configured origins. Requests without an `Origin`
/// header are not affected; unlisted origins get no CORS headers back.
pub fn cors_layer(cfg: &App) -> Result<CorsLayer> {
    let origins = cfg
        .allowed_origins()
        .into_iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid allowed origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

pub fn app(state: AppState, cors: CorsLayer) -> Router {
    routes::routes().layer(cors).with_state(state)
}
