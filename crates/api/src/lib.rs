//! User API Library
//!
//! HTTP/JSON surface for user management, served by axum over the
//! user service.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use user_service_lib::build_user_service;
use user_service_lib::infra::Database;

use crate::config::ApiConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect the store and assemble the application state.
pub async fn build_state(config: &ApiConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let database = Database::connect(&config.users.database).await?;
    let user_service = build_user_service(
        database.get_connection(),
        config.users.validation_policy,
    );

    info!(
        policy = %config.users.validation_policy,
        in_memory = config.users.database.is_in_memory(),
        "User service ready"
    );

    Ok(AppState::new(user_service, database))
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config).await?;
    let app = create_router(state);

    // Build address
    let addr: SocketAddr = config.server.addr().parse()?;
    info!("{} listening on {}", config.server.service_name, addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
