//! In-process stub of the Perpus backend for integration tests.
//!
//! Binds an axum router to an ephemeral port so tests run hermetically. The
//! stub records the query string and auth header of list calls and counts
//! dispatched requests, which is what the debounce and header tests assert on.

// Each test binary compiles this module; not every binary uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};

use perpus_client::{PerpusClient, SessionStore};

/// Token issued by the stub's login endpoint
pub const STUB_TOKEN: &str = "abc";

pub struct StubState {
    pub books: Mutex<Value>,
    pub members: Mutex<Value>,
    pub login_requests: AtomicUsize,
    pub member_requests: AtomicUsize,
    pub member_writes: AtomicUsize,
    pub last_books_query: Mutex<Option<String>>,
    pub last_members_query: Mutex<Option<String>>,
    pub last_auth_header: Mutex<Option<String>>,
    /// When set, authenticated list endpoints answer 401
    pub force_unauthorized: AtomicBool,
    /// When set, the stats endpoint answers 500 with a non-JSON body
    pub force_stats_error: AtomicBool,
    /// When set, the health endpoint answers 503
    pub health_down: AtomicBool,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            books: Mutex::new(json!([
                {
                    "id": 1,
                    "title": "1984",
                    "author": "George Orwell",
                    "isbn": "9780451524935",
                    "category": "Fiction",
                    "status": "available",
                    "copies": 2,
                    "created_at": "2023-01-15T00:00:00Z"
                },
                {
                    "id": 2,
                    "title": "The Hobbit",
                    "author": "J.R.R. Tolkien",
                    "isbn": "9780547928227",
                    "category": "Fantasy",
                    "status": "borrowed",
                    "copies": 3,
                    "created_at": "2023-02-20T00:00:00Z"
                }
            ])),
            members: Mutex::new(json!([
                {
                    "id": 1,
                    "name": "John Doe",
                    "email": "john@example.com",
                    "phone": "(555) 123-4567",
                    "membership_type": "Premium",
                    "status": "active",
                    "books_count": 3,
                    "join_date": "2023-01-15T00:00:00Z"
                },
                {
                    "id": 2,
                    "name": "Charlie Brown",
                    "email": "charlie@example.com",
                    "phone": "(555) 567-8901",
                    "membership_type": "Basic",
                    "status": "expired",
                    "books_count": 0,
                    "join_date": "2022-12-01T00:00:00Z"
                }
            ])),
            login_requests: AtomicUsize::new(0),
            member_requests: AtomicUsize::new(0),
            member_writes: AtomicUsize::new(0),
            last_books_query: Mutex::new(None),
            last_members_query: Mutex::new(None),
            last_auth_header: Mutex::new(None),
            force_unauthorized: AtomicBool::new(false),
            force_stats_error: AtomicBool::new(false),
            health_down: AtomicBool::new(false),
        }
    }
}

/// Start the stub on an ephemeral port.
pub async fn spawn_stub() -> (SocketAddr, Arc<StubState>) {
    let state = Arc::new(StubState::default());
    let app = router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    (addr, state)
}

/// Build a client pointed at the stub, with its token file in a temp dir.
pub fn client_for(addr: SocketAddr) -> (tempfile::TempDir, PerpusClient) {
    let dir = tempfile::tempdir().expect("tempdir");
    let session = Arc::new(SessionStore::new(dir.path().join("auth_token")));
    let client =
        PerpusClient::with_session(&format!("http://{}", addr), session).expect("build client");
    (dir, client)
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/health", get(health))
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/members", get(list_members).post(create_member))
        .route(
            "/api/members/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route("/api/members/stats/summary", get(member_stats))
        .route("/api/transactions/borrow", post(borrow))
        .route("/api/transactions/return", post(return_book))
        .route("/api/transactions", get(list_transactions))
        .route("/api/transactions/active-borrows", get(active_borrows))
        .with_state(state)
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(State(state): State<Arc<StubState>>, Form(form): Form<LoginForm>) -> Response {
    state.login_requests.fetch_add(1, Ordering::SeqCst);
    if form.username == "admin" && form.password == "admin123" {
        Json(json!({"access_token": STUB_TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect username or password"})),
        )
            .into_response()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", STUB_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

async fn me(headers: HeaderMap) -> Response {
    if authorized(&headers) {
        Json(json!({
            "id": 1,
            "username": "admin",
            "email": "admin@perpus.local",
            "is_active": true
        }))
        .into_response()
    } else {
        unauthorized()
    }
}

async fn health(State(state): State<Arc<StubState>>) -> Response {
    if state.health_down.load(Ordering::SeqCst) {
        (StatusCode::SERVICE_UNAVAILABLE, "down").into_response()
    } else {
        Json(json!({"status": "healthy"})).into_response()
    }
}

fn record_auth(state: &StubState, headers: &HeaderMap) {
    *state.last_auth_header.lock() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
}

async fn list_books(
    State(state): State<Arc<StubState>>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Response {
    record_auth(&state, &headers);
    *state.last_books_query.lock() = Some(raw.unwrap_or_default());
    if state.force_unauthorized.load(Ordering::SeqCst) {
        return unauthorized();
    }
    Json(state.books.lock().clone()).into_response()
}

async fn create_book(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    let mut books = state.books.lock();
    let arr = books.as_array_mut().expect("books array");
    let id = arr.len() as i64 + 1;
    let book = json!({
        "id": id,
        "title": body["title"],
        "author": body["author"],
        "isbn": body["isbn"],
        "category": body["category"],
        "status": body.get("status").cloned().unwrap_or(json!("available")),
        "copies": body["copies"],
        "created_at": Utc::now().to_rfc3339(),
    });
    arr.push(book.clone());
    (StatusCode::CREATED, Json(book)).into_response()
}

async fn list_members(
    State(state): State<Arc<StubState>>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.member_requests.fetch_add(1, Ordering::SeqCst);
    record_auth(&state, &headers);
    *state.last_members_query.lock() = Some(raw.unwrap_or_default());
    if state.force_unauthorized.load(Ordering::SeqCst) {
        return unauthorized();
    }

    let mut members = state
        .members
        .lock()
        .as_array()
        .expect("members array")
        .clone();
    if let Some(search) = params.get("search") {
        let needle = search.to_lowercase();
        members.retain(|m| {
            m["name"]
                .as_str()
                .map(|n| n.to_lowercase().contains(&needle))
                .unwrap_or(false)
                || m["email"]
                    .as_str()
                    .map(|e| e.to_lowercase().contains(&needle))
                    .unwrap_or(false)
        });
    }
    if let Some(status) = params.get("status") {
        members.retain(|m| m["status"] == json!(status));
    }
    Json(Value::Array(members)).into_response()
}

async fn get_member(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    let members = state.members.lock();
    match members
        .as_array()
        .expect("members array")
        .iter()
        .find(|m| m["id"] == json!(id))
    {
        Some(member) => Json(member.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Member not found"})),
        )
            .into_response(),
    }
}

async fn create_member(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.member_writes.fetch_add(1, Ordering::SeqCst);
    let mut members = state.members.lock();
    let arr = members.as_array_mut().expect("members array");
    let id = arr.iter().filter_map(|m| m["id"].as_i64()).max().unwrap_or(0) + 1;
    let member = json!({
        "id": id,
        "name": body["name"],
        "email": body["email"],
        "phone": body["phone"],
        "membership_type": body.get("membership_type").cloned().unwrap_or(json!("Basic")),
        "status": body.get("status").cloned().unwrap_or(json!("active")),
        "books_count": 0,
        "join_date": Utc::now().to_rfc3339(),
    });
    arr.push(member.clone());
    (StatusCode::CREATED, Json(member)).into_response()
}

async fn update_member(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> Response {
    state.member_writes.fetch_add(1, Ordering::SeqCst);
    let mut members = state.members.lock();
    let found = members
        .as_array_mut()
        .expect("members array")
        .iter_mut()
        .find(|m| m["id"] == json!(id));
    match found {
        Some(member) => {
            if let Some(fields) = patch.as_object() {
                for (key, value) in fields {
                    member[key] = value.clone();
                }
            }
            Json(member.clone()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Member not found"})),
        )
            .into_response(),
    }
}

async fn delete_member(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    state.member_writes.fetch_add(1, Ordering::SeqCst);
    let mut members = state.members.lock();
    let arr = members.as_array_mut().expect("members array");
    let before = arr.len();
    arr.retain(|m| m["id"] != json!(id));
    if arr.len() == before {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Member not found"})),
        )
            .into_response()
    } else {
        Json(json!({"message": "Member deleted successfully"})).into_response()
    }
}

async fn member_stats(State(state): State<Arc<StubState>>) -> Response {
    if state.force_stats_error.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    let members = state.members.lock();
    let arr = members.as_array().expect("members array");
    let active = arr.iter().filter(|m| m["status"] == "active").count();
    let expired = arr.iter().filter(|m| m["status"] == "expired").count();
    Json(json!({
        "total_members": arr.len(),
        "active": active,
        "expired": expired
    }))
    .into_response()
}

async fn borrow(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    if state.force_unauthorized.load(Ordering::SeqCst) {
        return unauthorized();
    }
    if body["book_id"] == json!(999) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Book is not available"})),
        )
            .into_response();
    }
    let due_days = body["due_days"].as_i64().unwrap_or(14);
    Json(json!({
        "message": "Book borrowed successfully",
        "transaction_id": 1,
        "due_date": (Utc::now() + Duration::days(due_days)).to_rfc3339(),
    }))
    .into_response()
}

async fn return_book(Json(body): Json<Value>) -> Response {
    if body["book_id"] == json!(999) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "No active borrow record found"})),
        )
            .into_response();
    }
    Json(json!({
        "message": "Book returned successfully",
        "transaction_id": 2,
        "is_late": false,
        "return_date": Utc::now().to_rfc3339(),
    }))
    .into_response()
}

async fn list_transactions(RawQuery(_raw): RawQuery) -> Response {
    Json(json!([
        {
            "id": 1,
            "book_id": 1,
            "member_id": 1,
            "transaction_type": "borrow",
            "transaction_date": "2024-01-01T10:00:00Z",
            "due_date": "2024-01-15T10:00:00Z",
            "return_date": null,
            "created_at": "2024-01-01T10:00:00Z"
        }
    ]))
    .into_response()
}

async fn active_borrows() -> Response {
    Json(json!([
        {
            "transaction_id": 1,
            "book_id": 2,
            "book_title": "The Hobbit",
            "member_id": 1,
            "member_name": "John Doe",
            "borrow_date": "2024-01-01T10:00:00Z",
            "due_date": "2024-01-15T10:00:00Z",
            "is_overdue": false
        }
    ]))
    .into_response()
}
