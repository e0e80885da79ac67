#![allow(dead_code)]

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use siswa_dashboard::core::config::Config;
use siswa_dashboard::core::state::AppState;
use siswa_dashboard::session::store::SessionStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TOKEN: &str = "T";

/// In-process stand-in for the remote Siswa API
#[derive(Default)]
pub struct StubApi {
    records: Mutex<Vec<Value>>,
    /// Answer every authenticated call with 401
    expire: AtomicBool,
    /// Answer every authenticated call with 500
    fail: AtomicBool,
    hits: Mutex<Vec<String>>,
    updates: Mutex<Vec<Value>>,
}

impl StubApi {
    pub fn with_records(records: Vec<Value>) -> Arc<Self> {
        let stub = Self::default();
        *stub.records.lock().unwrap() = records;
        Arc::new(stub)
    }

    pub fn expire_session(&self) {
        self.expire.store(true, Ordering::SeqCst);
    }

    pub fn fail_requests(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// `"METHOD /path"` of every request received, in order
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.lock().unwrap().len()
    }

    /// JSON bodies received by `PUT /siswa/{id}`
    pub fn updates(&self) -> Vec<Value> {
        self.updates.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port and return the base URL
    pub async fn spawn(self: &Arc<Self>) -> String {
        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/siswa", get(list))
            .route("/siswa/{id}", get(fetch).put(update).delete(remove))
            .layer(middleware::from_fn_with_state(Arc::clone(self), record_hit))
            .with_state(Arc::clone(self));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{}", addr)
    }

    fn check(&self, headers: &axum::http::HeaderMap) -> Result<(), Response> {
        if self.expire.load(Ordering::SeqCst) {
            return Err(StatusCode::UNAUTHORIZED.into_response());
        }

        let expected = format!("Bearer {}", TOKEN);
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == expected);
        if !authorized {
            return Err(StatusCode::UNAUTHORIZED.into_response());
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }

        Ok(())
    }
}

async fn record_hit(State(stub): State<Arc<StubApi>>, request: Request, next: Next) -> Response {
    stub.hits
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method(), request.uri().path()));
    next.run(request).await
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["username"] == "a" && body["password"] == "b" {
        Json(json!({ "success": true, "token": TOKEN })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Username atau password salah" })),
        )
            .into_response()
    }
}

async fn list(State(stub): State<Arc<StubApi>>, headers: axum::http::HeaderMap) -> Response {
    if let Err(response) = stub.check(&headers) {
        return response;
    }
    Json(Value::Array(stub.records.lock().unwrap().clone())).into_response()
}

async fn fetch(
    State(stub): State<Arc<StubApi>>,
    Path(id): Path<String>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = stub.check(&headers) {
        return response;
    }
    let records = stub.records.lock().unwrap();
    match records.iter().find(|r| r["id"] == id.as_str()) {
        Some(record) => Json(record.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update(
    State(stub): State<Arc<StubApi>>,
    Path(id): Path<String>,
    headers: axum::http::HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = stub.check(&headers) {
        return response;
    }
    stub.updates.lock().unwrap().push(body);
    Json(json!({ "id": id })).into_response()
}

async fn remove(
    State(stub): State<Arc<StubApi>>,
    Path(id): Path<String>,
    headers: axum::http::HeaderMap,
) -> Response {
    if let Err(response) = stub.check(&headers) {
        return response;
    }
    stub.records.lock().unwrap().retain(|r| r["id"] != id.as_str());
    StatusCode::NO_CONTENT.into_response()
}

pub fn record(id: &str, nama: &str, skor: &str, seconds: i64) -> Value {
    json!({
        "id": id,
        "nama": nama,
        "kelas": "5A",
        "sekolah": "SDN 1",
        "skor_bangun_datar": skor,
        "skor_luas_keliling": 70,
        "created_at": { "_seconds": seconds, "_nanoseconds": 0 }
    })
}

/// Application state pointed at `base_url`, optionally already signed in
pub fn app_state(base_url: &str, signed_in: bool) -> Arc<AppState> {
    let config = Config::from_toml(&format!(
        "[api]\nbase_url = \"{}\"\ntimeout_secs = 5\n",
        base_url
    ))
    .unwrap();

    let session = Arc::new(SessionStore::in_memory());
    if signed_in {
        session.store(TOKEN).unwrap();
    }

    Arc::new(AppState::with_session(config, session).unwrap())
}
