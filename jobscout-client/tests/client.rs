mod common;

use common::{client, hits, jobs_body, logged_in_client, mount_json};
use jobscout_client::{AuthEvent, ClientError, SessionStore};
use jobscout_core::domain::job::{CheckStatus, DateFilter, JobFilter};
use jobscout_core::domain::user::Role;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn attaches_bearer_token_when_logged_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/stats/"))
        .and(header("authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::stats_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, Role::Admin);
    let stats = client.job_stats().await.unwrap();
    assert_eq!(stats.overview.total_jobs, 120);
    assert_eq!(stats.today.total, 8);
}

#[tokio::test]
async fn sends_no_credentials_when_logged_out() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/jobs/stats/", common::stats_body()).await;

    let (client, _store) = client(&server);
    client.job_stats().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn unauthorized_clears_session_on_any_endpoint() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Given token not valid for any token type" })),
        )
        .mount(&server)
        .await;

    let calls: Vec<&str> = vec!["stats", "status", "logs", "jobs", "detail", "toggle", "me"];
    for call in calls {
        let (client, store) = logged_in_client(&server, Role::Admin);
        let mut events = client.subscribe();

        let error = match call {
            "stats" => client.job_stats().await.map(|_| ()),
            "status" => client.scraper_status().await.map(|_| ()),
            "logs" => client.scraper_logs(1).await.map(|_| ()),
            "jobs" => client.list_jobs(&JobFilter::default()).await.map(|_| ()),
            "detail" => client.get_job(3).await.map(|_| ()),
            "toggle" => client.toggle_check(3, true, "").await.map(|_| ()),
            _ => client.me().await.map(|_| ()),
        }
        .unwrap_err();

        match error {
            ClientError::Unauthorized { message, .. } => {
                assert_eq!(message, "Given token not valid for any token type")
            }
            other => panic!("{}: expected Unauthorized, got {:?}", call, other),
        }
        assert!(!store.is_authenticated(), "{} left the session behind", call);
        assert_eq!(events.try_recv().unwrap(), AuthEvent::SessionExpired);
        assert!(events.try_recv().is_err(), "{} published twice", call);
    }
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/scraper-status/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, Role::Admin);
    assert!(client.scraper_status().await.unwrap_err().is_authorization());
    assert_eq!(hits(&server, "/api/jobs/scraper-status/").await, 1);
}

#[tokio::test]
async fn other_failures_leave_session_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/detail/9/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/stats/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/scraper-status/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "detail": "Admins only" })))
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server, Role::JobSeeker);

    let not_found = client.get_job(9).await.unwrap_err();
    assert!(not_found.is_not_found());
    assert_eq!(not_found.field_errors().unwrap().message(), Some("Not found."));

    let unavailable = client.job_stats().await.unwrap_err();
    assert!(unavailable.is_transport());

    let forbidden = client.scraper_status().await.unwrap_err();
    assert!(forbidden.is_validation());

    assert!(store.is_authenticated());
}

#[tokio::test]
async fn list_jobs_serializes_filter_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/list/"))
        .and(query_param("date_filter", "yesterday"))
        .and(query_param("check_status", "checked"))
        .and(query_param("search", "rust developer"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(jobs_body(&[1, 2])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, Role::JobSeeker);
    let filter = JobFilter {
        date_filter: DateFilter::Yesterday,
        check_status: CheckStatus::Checked,
        search: "rust developer".to_string(),
        ordering: None,
        page: Some(3),
    };
    let page = client.list_jobs(&filter).await.unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.stats.unwrap().unchecked, 2);
}

#[tokio::test]
async fn empty_search_is_not_sent() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/api/jobs/list/", jobs_body(&[])).await;

    let (client, _store) = logged_in_client(&server, Role::JobSeeker);
    client.list_jobs(&JobFilter::default()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("date_filter=all"));
    assert!(query.contains("check_status=all"));
    assert!(!query.contains("search"));
}

#[tokio::test]
async fn toggle_check_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/jobs/toggle-check/"))
        .and(wiremock::matchers::body_json(
            json!({ "job_id": 7, "is_checked": true, "notes": "applied" }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Job marked as checked" })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, Role::JobSeeker);
    let response = client.toggle_check(7, true, "applied").await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Job marked as checked"));
}

#[tokio::test]
async fn scraper_logs_request_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/scraper-logs/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::logs_body()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, Role::Admin);
    let page = client.scraper_logs(2).await.unwrap();
    assert_eq!(page.logs[0].trigger_label(), "admin");
    assert_eq!(page.logs[0].links_found, 40);
}
