#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use actionlog::audit::Blacklist;
use actionlog::config::{Config, StorageBackend};
use actionlog::db::MemoryRepository;

/// A running test server backed by in-memory storage.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub repository: MemoryRepository,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Post an action log body, return (body, status).
    pub async fn post_action_log(&self, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/action-logs"))
            .json(body)
            .send()
            .await
            .expect("action log request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(blacklist: &[&str]) -> Config {
    Config {
        storage: StorageBackend::Memory,
        max_connections: 1,
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        blacklist: Blacklist::new(blacklist.iter().copied()),
        log_level: "warn".to_string(),
    }
}

/// Spawn a test app on a random port.
pub async fn spawn_app(blacklist: &[&str]) -> TestApp {
    let repository = MemoryRepository::new();
    let (app, _state) = actionlog::build_app(Arc::new(repository.clone()), test_config(blacklist));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        repository,
    }
}
