#![allow(dead_code)]

use std::sync::Arc;

use jobscout_client::{ApiClient, MemorySessionStore, SessionStore};
use jobscout_core::domain::session::Session;
use jobscout_core::domain::user::{Role, User};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn user(role: Role) -> User {
    User {
        id: 42,
        username: "alice".to_string(),
        role,
        email: None,
        first_name: None,
        last_name: None,
        phone: None,
    }
}

pub fn session(role: Role) -> Session {
    Session::new("access-token", "refresh-token", user(role)).unwrap()
}

/// Client against `server` with a fresh in-memory store
pub fn client(server: &MockServer) -> (ApiClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(server.uri(), store.clone() as Arc<dyn SessionStore>);
    (client, store)
}

/// Client against `server` that starts out logged in
pub fn logged_in_client(server: &MockServer, role: Role) -> (ApiClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::with_session(session(role)));
    let client = ApiClient::new(server.uri(), store.clone() as Arc<dyn SessionStore>);
    (client, store)
}

pub fn auth_body(role: &str, access: &str, refresh: &str) -> Value {
    json!({
        "message": "Login successful",
        "user": {
            "id": 1,
            "username": "admin",
            "role": role,
            "email": "admin@example.com",
            "tokens": { "access": access, "refresh": refresh }
        }
    })
}

pub fn stats_body() -> Value {
    json!({
        "overview": { "total_jobs": 120, "total_checked": 30 },
        "today": { "total": 8 },
        "yesterday": { "total": 11 }
    })
}

pub fn status_body(is_running: bool) -> Value {
    json!({
        "is_running": is_running,
        "scraper": { "started_at": "2024-05-01T10:00:00Z", "status": if is_running { "running" } else { "completed" } }
    })
}

pub fn logs_body() -> Value {
    json!({
        "logs": [{
            "id": 5,
            "started_at": "2024-05-01T10:00:00Z",
            "status": "completed",
            "total_videos_scraped": 12,
            "total_links_found": 40,
            "new_links_added": 6,
            "triggered_by_username": "admin"
        }],
        "count": 1
    })
}

pub fn jobs_body(ids: &[i64]) -> Value {
    let results: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "link": format!("https://example.com/jobs/{}", id),
                "date_found": "2024-05-01",
                "is_checked": false
            })
        })
        .collect();
    json!({
        "count": ids.len(),
        "results": results,
        "stats": { "total": ids.len(), "today": 1, "yesterday": 0, "checked": 0, "unchecked": ids.len() }
    })
}

pub async fn mount_json(server: &MockServer, http_method: &str, route: &str, body: Value) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Number of requests the server saw for a path
pub async fn hits(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}
