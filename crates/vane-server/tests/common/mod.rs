//! Test helpers for server operations

#![allow(dead_code)]

use std::sync::Arc;

use config::Config;
use vane_server::Server;
use vane_server::model::config::Configuration;
use vane_server::startup;

/// Configuration for a single-connection in-memory SQLite database
pub fn memory_configuration() -> Configuration {
    let config = Config::builder()
        .set_override("db.url", "sqlite::memory:")
        .and_then(|b| b.set_override("db.bootstrap", true))
        .and_then(|b| b.set_override("db.pool.maxConnections", 1_i64))
        .and_then(|b| b.set_override("db.pool.minConnections", 1_i64))
        .and_then(|b| b.build())
        .expect("test configuration");
    Configuration::from_config(config)
}

pub async fn server() -> Server {
    let store = startup::open_store(&memory_configuration())
        .await
        .expect("open in-memory store");
    Server::new(Arc::new(store))
}
