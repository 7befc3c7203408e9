//! In-process fixture backend for tests.
//!
//! Serves the handful of endpoints the tests exercise, with per-route hit
//! counters so tests can assert that a request was (or was not) issued.
//! The correct one-time code is `1234`, the correct PIN is `4321`, and the
//! only accepted bearer token is `tok-access`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::http::ApiClient;
use crate::session::{AuthTokens, Session};

pub(crate) const ACCESS_TOKEN: &str = "tok-access";

/// Per-route request counters.
#[derive(Default)]
pub(crate) struct Hits {
    pub send_otp: AtomicUsize,
    pub verify_otp: AtomicUsize,
    pub login_pin: AtomicUsize,
    pub me: AtomicUsize,
}

pub(crate) struct TestBackend {
    pub base_url: String,
    pub hits: Arc<Hits>,
}

/// The user record the fixture hands out on successful logins.
pub(crate) fn backend_user() -> joldosh_shared::User {
    serde_json::from_value(json!({
        "id": 7,
        "phone_number": "+996700112233",
        "full_name": "Test Driver",
        "is_driver": true,
    }))
    .unwrap()
}

fn tokens_response() -> Value {
    json!({
        "access": ACCESS_TOKEN,
        "refresh": "tok-refresh",
        "user": backend_user(),
    })
}

fn rejected(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

async fn send_otp(State(hits): State<Arc<Hits>>, Json(body): Json<Value>) -> Response {
    hits.send_otp.fetch_add(1, Ordering::SeqCst);
    if body["phone_number"] == "+996999999999" {
        return rejected(StatusCode::TOO_MANY_REQUESTS, "Too many requests");
    }
    Json(json!({ "detail": "sent" })).into_response()
}

async fn verify_otp(State(hits): State<Arc<Hits>>, Json(body): Json<Value>) -> Response {
    hits.verify_otp.fetch_add(1, Ordering::SeqCst);
    if body["otp_code"] == "1234" {
        Json(tokens_response()).into_response()
    } else {
        rejected(StatusCode::BAD_REQUEST, "Invalid code")
    }
}

async fn login_pin(State(hits): State<Arc<Hits>>, Json(body): Json<Value>) -> Response {
    hits.login_pin.fetch_add(1, Ordering::SeqCst);
    if body["pin_code"] == "4321" {
        Json(tokens_response()).into_response()
    } else {
        rejected(StatusCode::BAD_REQUEST, "Invalid PIN")
    }
}

async fn me(State(hits): State<Arc<Hits>>, headers: HeaderMap) -> Response {
    hits.me.fetch_add(1, Ordering::SeqCst);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {ACCESS_TOKEN}"))
        .unwrap_or(false);
    if authorized {
        Json(json!(backend_user())).into_response()
    } else {
        rejected(StatusCode::UNAUTHORIZED, "Invalid token")
    }
}

async fn announcements_available() -> Response {
    // DRF pagination envelope
    Json(json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [{
            "id": 1,
            "from_location": "Бишкек",
            "to_location": "Ош",
            "departure_time": "2026-08-24T06:00:00Z",
            "available_seats": 4,
            "booked_seats": 1,
            "price_per_seat": "1500",
            "status": "active",
            "driver": 7,
            "driver_name": "Test Driver",
            "created_at": "2026-08-20T10:00:00Z",
        }],
    }))
    .into_response()
}

async fn locations() -> Response {
    // bare array, no envelope
    Json(json!([
        { "id": 1, "code": "bishkek", "name": "Бишкек", "sort_order": 1, "is_active": true },
        { "id": 2, "code": "osh", "name": "Ош", "sort_order": 2, "is_active": true },
    ]))
    .into_response()
}

async fn create_booking(Json(body): Json<Value>) -> Response {
    if body["announcement"] == 404 {
        return rejected(StatusCode::BAD_REQUEST, "Not enough free seats");
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 55,
            "announcement": body["announcement"],
            "passenger": 7,
            "seats_count": body["seats_count"],
            "status": "pending",
            "created_at": "2026-08-22T09:00:00Z",
        })),
    )
        .into_response()
}

/// Spawn the fixture backend on an ephemeral port.
pub(crate) async fn spawn_backend() -> TestBackend {
    let hits = Arc::new(Hits::default());

    let app = Router::new()
        .route("/users/send-otp/", post(send_otp))
        .route("/users/verify-otp/", post(verify_otp))
        .route("/users/login-pin/", post(login_pin))
        .route("/users/me/", get(me))
        .route("/announcements/available/", get(announcements_available))
        .route("/locations/", get(locations))
        .route("/bookings/", post(create_booking))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestBackend {
        base_url: format!("http://{addr}"),
        hits,
    }
}

/// A fresh session backed by a database inside `dir`.
pub(crate) fn test_session(dir: &tempfile::TempDir) -> Arc<Session> {
    let db = joldosh_store::Database::open_at(&dir.path().join("test.db")).unwrap();
    Arc::new(Session::new(db))
}

/// A session already logged in with the fixture backend's token and user.
pub(crate) fn authenticated_session(dir: &tempfile::TempDir) -> Arc<Session> {
    let session = test_session(dir);
    session.initialize().unwrap();
    session
        .login(AuthTokens {
            access: ACCESS_TOKEN.to_string(),
            refresh: None,
            user: Some(backend_user()),
        })
        .unwrap();
    session
}

/// An `ApiClient` pointed at the fixture backend.
pub(crate) fn test_client(backend: &TestBackend, session: Arc<Session>) -> ApiClient {
    let config = ClientConfig {
        base_url: backend.base_url.clone(),
    };
    ApiClient::new(&config, session)
}
