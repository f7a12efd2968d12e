//! In-process stand-in for the quiz platform backend.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use quizdesk_core::api::AuthFailureHandler;
use quizdesk_core::routes::Navigator;

pub const EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "rahasia";
pub const VALID_TOKEN: &str = "valid-token";
/// Answered with a 403 whose message carries the invalid-token marker
pub const MARKER_TOKEN: &str = "marker-token";
/// Answered with a 400 carrying the structured invalid-token code
pub const CODED_TOKEN: &str = "coded-token";
/// Logs in fine, then fails the identity lookup with a 500
pub const BROKEN_ME_EMAIL: &str = "broken@example.com";
pub const BROKEN_ME_TOKEN: &str = "broken-me-token";
/// Identity lookup answers with both `_id` and the `id` virtual
pub const VIRTUAL_ID_TOKEN: &str = "virtual-id-token";

#[derive(Default)]
pub struct Stub {
    /// Authorization header of every request, in arrival order
    pub auth_headers: Mutex<Vec<Option<String>>>,
    pub me_calls: AtomicUsize,
    pub uploads: Mutex<Vec<(String, Vec<String>)>>,
}

impl Stub {
    pub fn last_auth_header(&self) -> Option<String> {
        self.auth_headers
            .lock()
            .unwrap()
            .last()
            .cloned()
            .flatten()
    }

    pub fn me_calls(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }
}

type Shared = Arc<Stub>;

fn record(stub: &Stub, headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.auth_headers.lock().unwrap().push(value.clone());
    value
}

/// Shared token check for the private endpoints.
fn authorize(stub: &Stub, headers: &HeaderMap) -> Result<(), Response> {
    match record(stub, headers).as_deref() {
        Some(h) if h == format!("Bearer {}", VALID_TOKEN) => Ok(()),
        Some(h) if h == format!("Bearer {}", BROKEN_ME_TOKEN) => Ok(()),
        Some(h) if h == format!("Bearer {}", VIRTUAL_ID_TOKEN) => Ok(()),
        Some(h) if h == format!("Bearer {}", MARKER_TOKEN) => Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "success": false, "message": "Akses ditolak, token tidak valid" })),
        )
            .into_response()),
        Some(h) if h == format!("Bearer {}", CODED_TOKEN) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "code": "TOKEN_INVALID", "message": "Session expired" })),
        )
            .into_response()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Tidak terotorisasi" })),
        )
            .into_response()),
    }
}

fn admin() -> Value {
    json!({
        "_id": "u-admin",
        "name": "Admin Utama",
        "email": EMAIL,
        "role": "admin",
        "createdAt": "2024-01-02T03:04:05.000Z"
    })
}

async fn login(State(stub): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    record(&stub, &headers);
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match (email, password) {
        (EMAIL, PASSWORD) => Json(json!({ "token": VALID_TOKEN })).into_response(),
        (BROKEN_ME_EMAIL, PASSWORD) => {
            Json(json!({ "data": { "token": BROKEN_ME_TOKEN } })).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Email atau password salah" })),
        )
            .into_response(),
    }
}

async fn me(State(stub): State<Shared>, headers: HeaderMap) -> Response {
    stub.me_calls.fetch_add(1, Ordering::SeqCst);
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if bearer.ends_with(BROKEN_ME_TOKEN) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }
    if bearer.ends_with(VIRTUAL_ID_TOKEN) {
        let mut user = admin();
        user["id"] = json!("u-admin");
        return Json(json!({ "success": true, "data": user })).into_response();
    }
    Json(json!({ "success": true, "data": admin() })).into_response()
}

async fn subjects(State(stub): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    Json(json!({
        "data": [
            { "_id": "s1", "title": "Matematika", "description": "Aljabar dasar" },
            { "_id": "s2", "title": "Fisika", "description": "" }
        ]
    }))
    .into_response()
}

async fn subject(State(stub): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    if id == "s1" {
        Json(json!({ "data": { "_id": "s1", "title": "Matematika", "description": "Aljabar dasar" } }))
            .into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "Mata pelajaran tidak ditemukan" })))
            .into_response()
    }
}

async fn create_subject(State(stub): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    if body["title"].as_str() == Some("Duplikat") {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Mata pelajaran sudah ada" })),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({ "data": { "_id": "s3", "title": body["title"] } })))
        .into_response()
}

/// Bare arrays, no envelope.
async fn tryouts(State(stub): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    Json(json!([
        { "_id": "t1", "title": "Try Out 1", "duration": 90, "questionsCount": 40 },
        { "_id": "t2", "title": "Try Out 2", "questions": [{ "id": "q", "question": "?" }] },
        { "_id": "t3", "title": "Try Out 3" }
    ]))
    .into_response()
}

async fn users(State(stub): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    Json(json!({
        "data": [
            admin(),
            { "_id": "u1", "name": "Sari", "email": "sari@example.com", "role": "siswa" },
            { "_id": "u2", "name": "Budi", "email": "budi@example.com", "role": "siswa" },
            { "_id": "u3", "name": "Dewi", "email": "dewi@example.com", "role": "siswa" }
        ]
    }))
    .into_response()
}

async fn delete_user(State(stub): State<Shared>, headers: HeaderMap, Path(_id): Path<String>) -> Response {
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn analytics(State(stub): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    match id.as_str() {
        "t1" => Json(json!({
            "data": {
                "participantCount": 2,
                "averageScore": 65.5,
                "highestScore": 81,
                "lowestScore": 50,
                "participants": [
                    { "name": "Sari", "score": 50 },
                    { "name": "Budi", "score": 81 }
                ]
            }
        }))
        .into_response(),
        _ => Json(json!({ "data": { "message": "Belum ada peserta" } })).into_response(),
    }
}

async fn create_info(State(stub): State<Shared>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    if let Err(rejection) = authorize(&stub, &headers) {
        return rejection;
    }
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let label = match field.file_name() {
            Some(file) => format!("{}={}", name, file),
            None => name,
        };
        let _ = field.bytes().await;
        fields.push(label);
    }
    stub.uploads.lock().unwrap().push(("/infos".to_string(), fields));
    (StatusCode::CREATED, Json(json!({ "success": true }))).into_response()
}

/// Serve the stub on an ephemeral port. Returns the origin and the shared state.
pub async fn spawn_backend() -> (String, Arc<Stub>) {
    let stub = Arc::new(Stub::default());

    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/subjects", get(subjects).post(create_subject))
        .route("/subjects/{id}", get(subject))
        .route("/tryouts", get(tryouts))
        .route("/users", get(users))
        .route("/users/{id}", delete(delete_user))
        .route("/analytics/tryout/{id}", get(analytics))
        .route("/infos", post(create_info));

    let app = Router::new()
        .nest("/api/v1", api)
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

/// Counts auto-logout callbacks.
#[derive(Default)]
pub struct CountingHandler {
    pub calls: AtomicUsize,
}

impl CountingHandler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AuthFailureHandler for CountingHandler {
    fn session_rejected(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Navigator that remembers every redirect.
pub struct RecordingNavigator {
    location: Mutex<String>,
    pub redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(location: &str) -> Self {
        Self {
            location: Mutex::new(location.to_string()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn location(&self) -> String {
        self.location.lock().unwrap().clone()
    }

    fn navigate(&self, path: &str) {
        *self.location.lock().unwrap() = path.to_string();
        self.redirects.lock().unwrap().push(path.to_string());
    }
}
