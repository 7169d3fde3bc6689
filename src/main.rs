// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use lodgekeep_server::api::router;
use lodgekeep_server::auth::{PublicRoutes, TokenCodec};
use lodgekeep_server::config::Config;
use lodgekeep_server::state::AppState;
use lodgekeep_server::store::InMemoryStore;

#[tokio::main]
async fn main() {
    init_tracing();

    // Configuration problems (missing or short signing secret, bad port)
    // are fatal before the listener opens.
    let config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("configuration error: {err}");
        std::process::exit(1);
    });

    let tokens = TokenCodec::new(&config.token_secret, config.token_ttl_secs).unwrap_or_else(
        |err| {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        },
    );

    let state = AppState::new(InMemoryStore::new(), tokens, PublicRoutes::defaults());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Lodgekeep server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
