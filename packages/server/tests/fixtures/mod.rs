//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use duet_server::{
    infrastructure::in_memory_context,
    ui::{AppState, build_router},
};
use tokio::{net::TcpListener, task::JoinHandle};

/// In-process server bound to an ephemeral port, stopped on drop
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = build_router(Arc::new(AppState::new(in_memory_context())));

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {e}");
            }
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Register a user and return its id
pub async fn register_user(client: &reqwest::Client, server: &TestServer, name: &str) -> String {
    let response = client
        .post(format!("{}/api/users", server.base_url()))
        .json(&serde_json::json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    body["id"].as_str().expect("id should be a string").to_string()
}

/// Send a message and return the raw response
pub async fn send_message(
    client: &reqwest::Client,
    server: &TestServer,
    sender_id: &str,
    receiver_id: &str,
    text: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/api/messages", server.base_url()))
        .json(&serde_json::json!({
            "sender_id": sender_id,
            "receiver_id": receiver_id,
            "text": text,
        }))
        .send()
        .await
        .expect("Failed to send request")
}

/// Canonical room key of two user ids
pub fn room_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}_{b}")
    } else {
        format!("{b}_{a}")
    }
}
