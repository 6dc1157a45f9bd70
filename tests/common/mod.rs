// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process IssueHub API double.
//!
//! Speaks the real wire contract (form login, `ih_refresh` cookie rotation,
//! bearer-authenticated resource routes, `{"items", "total"}` pages) over a
//! real listener so the client under test goes through actual HTTP. Failure
//! knobs let tests force expiry, refresh rejection, and rate limiting.

use axum::extract::{Form, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use issuehub_client::{Config, IssueHub, MemoryTokenStore, TokenStore};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

const CREATED_TS: &str = "2026-03-01T09:30:00";
const UPDATED_TS: &str = "2026-03-02T10:15:00";

#[derive(Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
}

#[derive(Clone, Serialize)]
pub struct ProjectRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Serialize)]
pub struct TicketRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub project_id: i64,
    pub owner_id: i64,
    pub assigned_to_id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Server-side state plus the failure knobs tests flip.
pub struct MockState {
    users: Mutex<Vec<UserRow>>,
    projects: Mutex<Vec<ProjectRow>>,
    tickets: Mutex<Vec<TicketRow>>,
    access_tokens: Mutex<HashMap<String, i64>>,
    refresh_tokens: Mutex<HashMap<String, i64>>,
    next_id: AtomicI64,
    next_grant: AtomicU64,
    calls: Mutex<Vec<String>>,
    /// Respond 429 + `Retry-After: 60` to every login.
    pub rate_limit_login: AtomicBool,
    /// Respond 429 + `Retry-After: 60` to every list read.
    pub rate_limit_reads: AtomicBool,
    /// Reject every refresh with 401 without consuming the cookie.
    pub fail_refresh: AtomicBool,
    /// Respond 500 to logout.
    pub fail_logout: AtomicBool,
    /// Mint tokens that no bearer check will accept.
    pub grant_dead_tokens: AtomicBool,
}

impl MockState {
    fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            projects: Mutex::new(Vec::new()),
            tickets: Mutex::new(Vec::new()),
            access_tokens: Mutex::new(HashMap::new()),
            refresh_tokens: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            next_grant: AtomicU64::new(1),
            calls: Mutex::new(Vec::new()),
            rate_limit_login: AtomicBool::new(false),
            rate_limit_reads: AtomicBool::new(false),
            fail_refresh: AtomicBool::new(false),
            fail_logout: AtomicBool::new(false),
            grant_dead_tokens: AtomicBool::new(false),
        }
    }

    #[allow(dead_code)]
    pub fn seed_user(&self, username: &str, password: &str) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.users.lock().unwrap().push(UserRow {
            id,
            username: username.to_string(),
            password: password.to_string(),
            full_name: None,
            email: None,
            is_active: true,
        });
        id
    }

    #[allow(dead_code)]
    pub fn seed_project(&self, owner_id: i64, name: &str, description: Option<&str>) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.projects.lock().unwrap().push(ProjectRow {
            id,
            owner_id,
            name: name.to_string(),
            description: description.map(String::from),
            created_at: Some(CREATED_TS.to_string()),
            updated_at: None,
        });
        id
    }

    #[allow(dead_code)]
    pub fn seed_ticket(&self, project_id: i64, title: &str, status: &str, priority: &str) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.tickets.lock().unwrap().push(TicketRow {
            id,
            title: title.to_string(),
            description: None,
            status: status.to_string(),
            priority: priority.to_string(),
            project_id,
            owner_id: 1,
            assigned_to_id: None,
            created_at: Some(CREATED_TS.to_string()),
            updated_at: None,
        });
        id
    }

    /// Invalidate every outstanding access token, as a server restart would.
    /// Refresh cookies stay valid.
    #[allow(dead_code)]
    pub fn expire_access_tokens(&self) {
        self.access_tokens.lock().unwrap().clear();
    }

    /// How many times `label` (e.g. `"GET /tickets"`) was served.
    #[allow(dead_code)]
    pub fn calls(&self, label: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == label)
            .count()
    }

    #[allow(dead_code)]
    pub fn project_row(&self, id: i64) -> Option<ProjectRow> {
        self.projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    #[allow(dead_code)]
    pub fn ticket_row(&self, id: i64) -> Option<TicketRow> {
        self.tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    #[allow(dead_code)]
    pub fn ticket_count(&self) -> usize {
        self.tickets.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn user_row(&self, id: i64) -> Option<UserRow> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    fn record(&self, label: &str) {
        self.calls.lock().unwrap().push(label.to_string());
    }

    // Mint an access token and a refresh cookie value for `user_id`.
    fn grant(&self, user_id: i64) -> (String, String) {
        let n = self.next_grant.fetch_add(1, Ordering::SeqCst);
        let access = format!("tok-{n}");
        let refresh = format!("rt-{n}");
        if !self.grant_dead_tokens.load(Ordering::SeqCst) {
            self.access_tokens
                .lock()
                .unwrap()
                .insert(access.clone(), user_id);
        }
        self.refresh_tokens
            .lock()
            .unwrap()
            .insert(refresh.clone(), user_id);
        (access, refresh)
    }

    fn bearer_user(&self, headers: &HeaderMap) -> Option<i64> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?
            .to_string();
        self.access_tokens.lock().unwrap().get(&token).copied()
    }
}

/// A running API double.
pub struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
}

/// Start the double on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_api() -> MockApi {
    let state = Arc::new(MockState::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock listener");
    let addr = listener.local_addr().expect("Failed to read mock address");

    let app = router(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Mock server exited");
    });

    MockApi {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// Client against the double with throwaway in-memory token storage.
#[allow(dead_code)]
pub fn build_hub(api: &MockApi) -> IssueHub {
    build_hub_with_storage(api, Arc::new(MemoryTokenStore::new()))
}

#[allow(dead_code)]
pub fn build_hub_with_storage(api: &MockApi, storage: Arc<dyn TokenStore>) -> IssueHub {
    let config = Config {
        api_url: api.base_url.clone(),
        ..Config::default()
    };
    IssueHub::new(&config, storage).expect("Failed to build client")
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/token", post(login))
        .route("/token/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/users", post(register))
        .route("/users/me", get(me))
        .route("/users/update", put(update_user))
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/tickets/{id}",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route("/health", get(health))
        .with_state(state)
}

// ─── Auth routes ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

fn refresh_cookie(value: String) -> Cookie<'static> {
    Cookie::build(("ih_refresh", value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

// No detail key, so clients fall back to the Retry-After header.
fn rate_limited() -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [(header::RETRY_AFTER, "60")],
        Json(json!({"error": "rate limit exceeded"})),
    )
        .into_response()
}

async fn login(
    State(st): State<Arc<MockState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    st.record("POST /token");

    if st.rate_limit_login.load(Ordering::SeqCst) {
        return rate_limited();
    }

    let user_id = st
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.username == form.username && u.password == form.password)
        .map(|u| u.id);

    match user_id {
        Some(id) => {
            let (access, refresh) = st.grant(id);
            let jar = jar.add(refresh_cookie(refresh));
            (
                jar,
                Json(json!({"access_token": access, "token_type": "bearer"})),
            )
                .into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect username or password"})),
        )
            .into_response(),
    }
}

async fn refresh(State(st): State<Arc<MockState>>, jar: CookieJar) -> Response {
    st.record("POST /token/refresh");

    if st.fail_refresh.load(Ordering::SeqCst) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid refresh token"})),
        )
            .into_response();
    }

    // Rotation consumes the presented cookie even before validation.
    let user_id = jar
        .get("ih_refresh")
        .and_then(|c| st.refresh_tokens.lock().unwrap().remove(c.value()));

    match user_id {
        Some(id) => {
            let (access, refresh) = st.grant(id);
            let jar = jar.add(refresh_cookie(refresh));
            (
                jar,
                Json(json!({"access_token": access, "token_type": "bearer"})),
            )
                .into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid refresh token"})),
        )
            .into_response(),
    }
}

async fn logout(State(st): State<Arc<MockState>>, jar: CookieJar) -> Response {
    st.record("POST /logout");

    if st.fail_logout.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "logout failed"})),
        )
            .into_response();
    }

    if let Some(cookie) = jar.get("ih_refresh") {
        st.refresh_tokens.lock().unwrap().remove(cookie.value());
    }
    let jar = jar.remove(Cookie::build(("ih_refresh", "")).path("/").build());
    (jar, Json(json!({"message": "ok"}))).into_response()
}

// ─── User routes ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RegisterBody {
    username: String,
    password: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

fn user_json(user: &UserRow) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "full_name": user.full_name,
        "email": user.email,
        "is_active": user.is_active,
    })
}

fn validation_error(msg: &str, field: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "detail": [{"msg": msg, "type": "value_error", "loc": ["body", field]}]
        })),
    )
        .into_response()
}

async fn register(State(st): State<Arc<MockState>>, Json(body): Json<RegisterBody>) -> Response {
    st.record("POST /users");

    if body.username.trim().is_empty() {
        return validation_error("String should have at least 1 character", "username");
    }

    let mut users = st.users.lock().unwrap();
    if users.iter().any(|u| u.username == body.username) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Username already registered"})),
        )
            .into_response();
    }

    let id = st.next_id.fetch_add(1, Ordering::SeqCst);
    let user = UserRow {
        id,
        username: body.username,
        password: body.password,
        full_name: body.full_name,
        email: body.email,
        is_active: true,
    };
    let response = Json(user_json(&user)).into_response();
    users.push(user);
    response
}

async fn me(State(st): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    st.record("GET /users/me");

    let Some(user_id) = st.bearer_user(&headers) else {
        return unauthorized();
    };
    match st.users.lock().unwrap().iter().find(|u| u.id == user_id) {
        Some(user) => Json(user_json(user)).into_response(),
        None => unauthorized(),
    }
}

async fn update_user(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    st.record("PUT /users/update");

    let Some(user_id) = st.bearer_user(&headers) else {
        return unauthorized();
    };
    let mut users = st.users.lock().unwrap();
    let Some(user) = users.iter_mut().find(|u| u.id == user_id) else {
        return unauthorized();
    };

    if let Some(username) = body.get("username").and_then(Value::as_str) {
        user.username = username.to_string();
    }
    if let Some(full_name) = body.get("full_name").and_then(Value::as_str) {
        user.full_name = Some(full_name.to_string());
    }
    if let Some(email) = body.get("email").and_then(Value::as_str) {
        user.email = Some(email.to_string());
    }
    if let Some(password) = body.get("password").and_then(Value::as_str) {
        user.password = password.to_string();
    }

    Json(json!({"message": "User updated"})).into_response()
}

// ─── Project routes ──────────────────────────────────────────────────────────

fn paging(params: &HashMap<String, String>, default_limit: usize) -> (usize, usize) {
    let page = params
        .get("page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let limit = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_limit);
    (page, limit)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

async fn list_projects(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    st.record("GET /projects");

    // Throttling happens ahead of auth, as a proxy would.
    if st.rate_limit_reads.load(Ordering::SeqCst) {
        return rate_limited();
    }
    if st.bearer_user(&headers).is_none() {
        return unauthorized();
    }

    let mut rows: Vec<ProjectRow> = st.projects.lock().unwrap().clone();
    if let Some(search) = params.get("search") {
        rows.retain(|p| {
            contains_ci(&p.name, search)
                || p.description
                    .as_deref()
                    .is_some_and(|d| contains_ci(d, search))
        });
    }

    let descending = params.get("sort_direction").map(String::as_str) == Some("desc");
    match params.get("sort_field").map(String::as_str) {
        Some("name") => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        _ => rows.sort_by_key(|p| p.id),
    }
    if descending {
        rows.reverse();
    }

    let total = rows.len();
    let (page, limit) = paging(&params, 5);
    let items: Vec<ProjectRow> = rows.into_iter().skip(page * limit).take(limit).collect();
    Json(json!({"items": items, "total": total})).into_response()
}

#[derive(Deserialize)]
struct ProjectBody {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

async fn create_project(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<ProjectBody>,
) -> Response {
    st.record("POST /projects");

    let Some(user_id) = st.bearer_user(&headers) else {
        return unauthorized();
    };
    if body.name.trim().is_empty() {
        return validation_error("String should have at least 1 character", "name");
    }

    let id = st.next_id.fetch_add(1, Ordering::SeqCst);
    let row = ProjectRow {
        id,
        owner_id: user_id,
        name: body.name,
        description: body.description,
        created_at: Some(CREATED_TS.to_string()),
        updated_at: None,
    };
    st.projects.lock().unwrap().push(row.clone());
    Json(row).into_response()
}

fn project_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Project not found"})),
    )
        .into_response()
}

async fn get_project(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    st.record("GET /projects/{id}");

    if st.bearer_user(&headers).is_none() {
        return unauthorized();
    }
    let Some(row) = st.project_row(id) else {
        return project_not_found();
    };

    // The detail route also embeds the project's tickets.
    let tickets: Vec<TicketRow> = st
        .tickets
        .lock()
        .unwrap()
        .iter()
        .filter(|t| t.project_id == id)
        .cloned()
        .collect();
    let mut body = serde_json::to_value(&row).unwrap();
    body["tickets"] = serde_json::to_value(tickets).unwrap();
    Json(body).into_response()
}

async fn update_project(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    st.record("PUT /projects/{id}");

    if st.bearer_user(&headers).is_none() {
        return unauthorized();
    }
    let mut projects = st.projects.lock().unwrap();
    let Some(row) = projects.iter_mut().find(|p| p.id == id) else {
        return project_not_found();
    };

    if let Some(name) = body.get("name").and_then(Value::as_str) {
        row.name = name.to_string();
    }
    if let Some(description) = body.get("description").and_then(Value::as_str) {
        row.description = Some(description.to_string());
    }
    row.updated_at = Some(UPDATED_TS.to_string());
    Json(row.clone()).into_response()
}

async fn delete_project(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    st.record("DELETE /projects/{id}");

    if st.bearer_user(&headers).is_none() {
        return unauthorized();
    }
    let has_tickets = st.tickets.lock().unwrap().iter().any(|t| t.project_id == id);
    if has_tickets {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Cannot delete a project that still has tickets"})),
        )
            .into_response();
    }

    let mut projects = st.projects.lock().unwrap();
    let Some(pos) = projects.iter().position(|p| p.id == id) else {
        return project_not_found();
    };
    let row = projects.remove(pos);
    Json(row).into_response()
}

// ─── Ticket routes ───────────────────────────────────────────────────────────

async fn list_tickets(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    st.record("GET /tickets");

    if st.rate_limit_reads.load(Ordering::SeqCst) {
        return rate_limited();
    }
    if st.bearer_user(&headers).is_none() {
        return unauthorized();
    }

    let mut rows: Vec<TicketRow> = st.tickets.lock().unwrap().clone();
    if let Some(search) = params.get("search") {
        rows.retain(|t| {
            contains_ci(&t.title, search)
                || t.description
                    .as_deref()
                    .is_some_and(|d| contains_ci(d, search))
        });
    }
    if let Some(status) = params.get("status") {
        rows.retain(|t| t.status == *status);
    }
    if let Some(priority) = params.get("priority") {
        rows.retain(|t| t.priority == *priority);
    }
    if let Some(project_id) = params.get("project_id").and_then(|v| v.parse::<i64>().ok()) {
        rows.retain(|t| t.project_id == project_id);
    }

    let descending = params.get("sort_direction").map(String::as_str) == Some("desc");
    match params.get("sort_field").map(String::as_str) {
        Some("title") => rows.sort_by(|a, b| a.title.cmp(&b.title)),
        _ => rows.sort_by_key(|t| t.id),
    }
    if descending {
        rows.reverse();
    }

    let total = rows.len();
    let (page, limit) = paging(&params, 10);
    let items: Vec<TicketRow> = rows.into_iter().skip(page * limit).take(limit).collect();
    Json(json!({"items": items, "total": total})).into_response()
}

#[derive(Deserialize)]
struct TicketBody {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    project_id: i64,
    #[serde(default)]
    assigned_to_id: Option<i64>,
}

async fn create_ticket(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<TicketBody>,
) -> Response {
    st.record("POST /tickets");

    let Some(user_id) = st.bearer_user(&headers) else {
        return unauthorized();
    };
    if body.title.trim().is_empty() {
        return validation_error("String should have at least 1 character", "title");
    }
    let project_exists = st
        .projects
        .lock()
        .unwrap()
        .iter()
        .any(|p| p.id == body.project_id);
    if !project_exists {
        return project_not_found();
    }

    let id = st.next_id.fetch_add(1, Ordering::SeqCst);
    let row = TicketRow {
        id,
        title: body.title,
        description: body.description,
        status: body.status.unwrap_or_else(|| "open".to_string()),
        priority: body.priority.unwrap_or_else(|| "medium".to_string()),
        project_id: body.project_id,
        owner_id: user_id,
        assigned_to_id: body.assigned_to_id,
        created_at: Some(CREATED_TS.to_string()),
        updated_at: None,
    };
    st.tickets.lock().unwrap().push(row.clone());
    Json(row).into_response()
}

fn ticket_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Ticket not found"})),
    )
        .into_response()
}

async fn get_ticket(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    st.record("GET /tickets/{id}");

    if st.bearer_user(&headers).is_none() {
        return unauthorized();
    }
    match st.ticket_row(id) {
        Some(row) => Json(row).into_response(),
        None => ticket_not_found(),
    }
}

async fn update_ticket(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    st.record("PUT /tickets/{id}");

    if st.bearer_user(&headers).is_none() {
        return unauthorized();
    }
    let mut tickets = st.tickets.lock().unwrap();
    let Some(row) = tickets.iter_mut().find(|t| t.id == id) else {
        return ticket_not_found();
    };

    if let Some(title) = body.get("title").and_then(Value::as_str) {
        row.title = title.to_string();
    }
    if let Some(description) = body.get("description").and_then(Value::as_str) {
        row.description = Some(description.to_string());
    }
    if let Some(status) = body.get("status").and_then(Value::as_str) {
        row.status = status.to_string();
    }
    if let Some(priority) = body.get("priority").and_then(Value::as_str) {
        row.priority = priority.to_string();
    }
    if let Some(assigned) = body.get("assigned_to_id").and_then(Value::as_i64) {
        row.assigned_to_id = Some(assigned);
    }
    if let Some(project_id) = body.get("project_id").and_then(Value::as_i64) {
        row.project_id = project_id;
    }
    row.updated_at = Some(UPDATED_TS.to_string());
    Json(row.clone()).into_response()
}

async fn delete_ticket(
    State(st): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    st.record("DELETE /tickets/{id}");

    if st.bearer_user(&headers).is_none() {
        return unauthorized();
    }
    let mut tickets = st.tickets.lock().unwrap();
    let Some(pos) = tickets.iter().position(|t| t.id == id) else {
        return ticket_not_found();
    };
    let row = tickets.remove(pos);
    Json(row).into_response()
}

async fn health(State(st): State<Arc<MockState>>) -> Response {
    st.record("GET /health");
    Json(json!({"status": "ok"})).into_response()
}
