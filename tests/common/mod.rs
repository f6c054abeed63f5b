#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{json, Value};

use labboard::config::Config;
use labboard::gate::Digest;
use labboard::models::LaneSet;
use labboard::state::{AppState, SharedState};

pub const ADMIN_PASSWORD: &str = "correct-secret";

/// What the fake remote JSON store has seen and will serve.
#[derive(Default)]
pub struct RemoteLog {
    pub data: Value,
    pub pushes: Vec<Value>,
    pub gets: usize,
    pub fail: bool,
}

/// A stand-in for the opaque remote JSON store.
#[derive(Clone)]
pub struct FakeRemote {
    pub addr: SocketAddr,
    pub log: Arc<Mutex<RemoteLog>>,
}

impl FakeRemote {
    pub fn url(&self) -> String {
        format!("http://{}/store", self.addr)
    }

    pub fn pushes(&self) -> Vec<Value> {
        self.log.lock().unwrap().pushes.clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.log.lock().unwrap().fail = fail;
    }

    pub fn set_data(&self, data: Value) {
        self.log.lock().unwrap().data = data;
    }
}

async fn remote_get(State(log): State<Arc<Mutex<RemoteLog>>>) -> (StatusCode, Json<Value>) {
    let mut log = log.lock().unwrap();
    log.gets += 1;
    if log.fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "down" })));
    }
    (StatusCode::OK, Json(json!({ "data": log.data.clone() })))
}

async fn remote_post(
    State(log): State<Arc<Mutex<RemoteLog>>>,
    Json(body): Json<Value>,
) -> StatusCode {
    let mut log = log.lock().unwrap();
    log.pushes.push(body.clone());
    if log.fail {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    log.data = body["data"].clone();
    StatusCode::OK
}

pub async fn spawn_remote(initial: Value) -> FakeRemote {
    let log = Arc::new(Mutex::new(RemoteLog {
        data: initial,
        ..Default::default()
    }));

    let app = Router::new()
        .route("/store", get(remote_get).post(remote_post))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake remote");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake remote failed");
    });

    FakeRemote { addr, log }
}

/// A running labboard instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn login(&self, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/session"))
            .json(&json!({ "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Log in as admin and return the bearer token.
    pub async fn bootstrap(&self) -> String {
        let (body, status) = self.login(ADMIN_PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(sync_endpoint: Option<String>) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
        sync_endpoint,
        admin_digest: Some(Digest::of(ADMIN_PASSWORD)),
        files_endpoint: None,
        lanes: LaneSet::default(),
        cache_dir: None,
        session_dir: None,
    }
}

/// Spawn an app from `config` after running the board's initial load.
pub async fn spawn_app_with(config: Config) -> TestApp {
    let state: SharedState = Arc::new(AppState::from_config(config).expect("Invalid test config"));
    state.board.init().await;

    let app = labboard::build_app(state.clone());

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
        state,
    }
}

/// Spawn an app without remote sync.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config(None)).await
}

/// Spawn an app mirrored to a fresh fake remote seeded with `initial`.
pub async fn spawn_synced_app(initial: Value) -> (TestApp, FakeRemote) {
    let remote = spawn_remote(initial).await;
    let app = spawn_app_with(test_config(Some(remote.url()))).await;
    (app, remote)
}
