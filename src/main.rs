use std::{sync::Arc, time::Duration};

use axum::{Router, middleware::from_fn_with_state};
use dotenv::dotenv;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::FmtSubscriber;

use crate::{
    admin::handlers::admin_routes,
    common::app_state::AppState,
    config::config::CONFIG,
    health::handlers::health_routes,
    mw::auth_mw::auth_mw,
    play::handlers::play_routes,
    quiz::handlers::{question_routes, quiz_routes},
};

mod admin;
mod auth;
mod client;
mod common;
mod config;
mod health;
mod mw;
mod play;
mod quiz;

#[cfg(test)]
mod tests;

pub fn app(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .nest("/health", health_routes(state.clone()))
        .nest("/play", play_routes(state.clone()));

    let protected_routes = Router::new()
        .nest("/quiz", quiz_routes(state.clone()))
        .nest("/question", question_routes(state.clone()))
        .nest("/admin", admin_routes(state.clone()))
        .layer(from_fn_with_state(state.clone(), auth_mw));

    Router::new().merge(protected_routes).merge(public_routes)
}

#[tokio::main]
async fn main() {
    // Initialize .env
    dotenv().ok();

    // Initialize logging
    let level = CONFIG
        .server
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global tracing");

    // Initialize state
    let state = AppState::from_connection_string(&CONFIG.database_url)
        .await
        .unwrap_or_else(|e| panic!("{}", e));

    state
        .get_sessions()
        .clone()
        .spawn_cleanup(Duration::from_secs(CONFIG.play.cleanup_interval_secs));

    // Initialize webserver
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", CONFIG.server.address, CONFIG.server.port))
            .await
            .unwrap_or_else(|e| panic!("Failed to bind listener: {}", e));

    info!(
        "Server listening on address: {:?}",
        listener.local_addr().ok()
    );
    axum::serve(listener, app(state))
        .await
        .unwrap_or_else(|e| panic!("Server error: {}", e));
}
