use std::sync::Arc;

use dotenvy::dotenv;
use session_auth_axum::{
    AuthState, InMemoryUserStore, PORT, SessionConfig, SessionManager, session_auth_router,
};

mod server;

use crate::server::{init_tracing, serve_http};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let config = SessionConfig::from_env();
    tracing::debug!("Session config: {:?}", config);

    let users = Arc::new(InMemoryUserStore::seeded());
    let state = AuthState::from_parts(users, SessionManager::new(config));
    let app = session_auth_router(state);

    serve_http(*PORT, app).await?;
    Ok(())
}
