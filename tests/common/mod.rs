//! Local stand-in for the genderize / agify / nationalize services.

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockState {
    /// Service path ("gender", "age", "nationality") that answers with HTTP 500.
    pub fail: Option<&'static str>,
    /// Every query string received, in arrival order.
    pub requests: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

impl MockState {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

pub struct MockServices {
    pub base: String,
    pub state: MockState,
}

impl MockServices {
    pub fn lookup_toml(&self) -> String {
        format!(
            r#"[lookup]
gender_url = "{base}/gender"
age_url = "{base}/age"
nationality_url = "{base}/nationality"
timeout_secs = 5
country = "US"
"#,
            base = self.base
        )
    }
}

fn record(state: &MockState, service: &str, q: &HashMap<String, String>) -> Option<Response> {
    state
        .requests
        .lock()
        .unwrap()
        .push((service.to_string(), q.clone()));
    if state.fail == Some(service) {
        return Some((StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response());
    }
    None
}

fn name_of(q: &HashMap<String, String>) -> String {
    q.get("name").cloned().unwrap_or_default()
}

async fn gender(State(state): State<MockState>, Query(q): Query<HashMap<String, String>>) -> Response {
    if let Some(resp) = record(&state, "gender", &q) {
        return resp;
    }
    Json(json!({
        "count": 1234,
        "name": name_of(&q),
        "gender": "male",
        "probability": 0.8
    }))
    .into_response()
}

async fn age(State(state): State<MockState>, Query(q): Query<HashMap<String, String>>) -> Response {
    if let Some(resp) = record(&state, "age", &q) {
        return resp;
    }
    Json(json!({ "count": 99, "name": name_of(&q), "age": 40 })).into_response()
}

async fn nationality(
    State(state): State<MockState>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    if let Some(resp) = record(&state, "nationality", &q) {
        return resp;
    }
    Json(json!({
        "count": 7,
        "name": name_of(&q),
        "country": [
            { "country_id": "US", "probability": 0.3 },
            { "country_id": "IL", "probability": 0.12 }
        ]
    }))
    .into_response()
}

/// Start the mock on an ephemeral port.
pub async fn spawn_mock(fail: Option<&'static str>) -> MockServices {
    let state = MockState {
        fail,
        ..MockState::default()
    };
    let app = Router::new()
        .route("/gender", get(gender))
        .route("/age", get(age))
        .route("/nationality", get(nationality))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServices {
        base: format!("http://{}", addr),
        state,
    }
}

/// Write a config file pointing at `services` with the db under `root`.
pub fn write_config(root: &Path, services: Option<&MockServices>) -> PathBuf {
    let mut content = format!("[db]\npath = \"{}/data/nameinfo.sqlite\"\n\n", root.display());
    if let Some(services) = services {
        content.push_str(&services.lookup_toml());
    }
    let path = root.join("nameinfo.toml");
    std::fs::write(&path, content).unwrap();
    path
}
