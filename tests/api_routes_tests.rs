use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use std::fs;
use tower::ServiceExt;

use vuln_demo::config::Config;
use vuln_demo::db::UsersStorage;
use vuln_demo::router::{DemoState, demo_router};
use vuln_demo::service::seed_users;

async fn seeded_storage() -> UsersStorage {
    let storage = UsersStorage::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    seed_users(&storage).await;
    storage
}

async fn app_with(cfg: &Config) -> Router {
    let storage = seeded_storage().await;
    demo_router(DemoState::from_config(storage, cfg))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = String::from_utf8(body.to_vec()).expect("response body was not utf-8");
    (status, content_type, body)
}

fn names(body: &str) -> Vec<String> {
    let rows: Vec<Value> = serde_json::from_str(body).expect("body was not a JSON array");
    rows.iter()
        .map(|row| row["name"].as_str().expect("name column").to_string())
        .collect()
}

#[tokio::test]
async fn seeding_creates_the_three_fixed_users() {
    let storage = seeded_storage().await;
    let users = storage.list_users().await.expect("list users");

    let rows: Vec<(i64, &str, &str)> = users
        .iter()
        .map(|u| (u.id, u.name.as_str(), u.email.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (1, "John Doe", "john.doe@example.com"),
            (2, "Jane Smith", "jane.smith@example.com"),
            (3, "Bob Johnson", "bob.johnson@example.com"),
        ]
    );
}

#[tokio::test]
async fn user_by_id_returns_matching_row() {
    let app = app_with(&Config::default()).await;
    let (status, _, body) = get(app, "/api/users/2").await;

    assert_eq!(status, StatusCode::OK);
    let rows: Vec<Value> = serde_json::from_str(&body).expect("json rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], Value::from(2));
    assert_eq!(rows[0]["name"], Value::from("Jane Smith"));
    assert_eq!(rows[0]["email"], Value::from("jane.smith@example.com"));
}

#[tokio::test]
async fn quote_in_user_id_changes_query_semantics() {
    let app = app_with(&Config::default()).await;
    // ' OR '1'='1
    let (status, _, body) = get(app, "/api/users/'%20OR%20'1'%3D'1").await;

    assert_eq!(status, StatusCode::OK);
    let mut found = names(&body);
    found.sort();
    assert_eq!(found, vec!["Bob Johnson", "Jane Smith", "John Doe"]);
}

#[tokio::test]
async fn unbalanced_quote_surfaces_as_internal_error() {
    let app = app_with(&Config::default()).await;
    let (status, _, body) = get(app, "/api/users/'").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains(r#""code":"INTERNAL_ERROR""#));
}

#[tokio::test]
async fn search_matches_name_fragment() {
    let app = app_with(&Config::default()).await;
    let (status, _, body) = get(app, "/api/search?name=John").await;

    assert_eq!(status, StatusCode::OK);
    let mut found = names(&body);
    found.sort();
    assert_eq!(found, vec!["Bob Johnson", "John Doe"]);
}

#[tokio::test]
async fn search_without_match_returns_empty_list() {
    let app = app_with(&Config::default()).await;
    let (status, _, body) = get(app, "/api/search?name=nobody").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn search_requires_name_parameter() {
    let app = app_with(&Config::default()).await;
    let (status, _, _) = get(app, "/api/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn welcome_echoes_markup_unescaped() {
    let app = app_with(&Config::default()).await;
    let (status, content_type, body) =
        get(app, "/api/welcome?username=%3Cscript%3Ealert(1)%3C%2Fscript%3E").await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/html"))
    );
    assert_eq!(
        body,
        "<html><body>\n<h1>Welcome <script>alert(1)</script>!</h1>\n</body></html>\n"
    );
}

#[tokio::test]
async fn file_inside_data_dir_is_returned() {
    let root = tempfile::tempdir().expect("tempdir");
    let data_dir = root.path().join("data");
    fs::create_dir(&data_dir).expect("create data dir");
    fs::write(data_dir.join("notes.txt"), "hello from data").expect("write file");

    let cfg = Config {
        data_dir: format!("{}/", data_dir.display()),
        ..Config::default()
    };
    let (status, _, body) = get(app_with(&cfg).await, "/api/files/notes.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "hello from data");
}

#[tokio::test]
async fn dot_dot_segment_escapes_data_dir() {
    let root = tempfile::tempdir().expect("tempdir");
    let data_dir = root.path().join("data");
    fs::create_dir(&data_dir).expect("create data dir");
    fs::write(root.path().join("secret.txt"), "outside the base dir").expect("write secret");

    let cfg = Config {
        data_dir: format!("{}/", data_dir.display()),
        ..Config::default()
    };
    let (status, _, body) = get(app_with(&cfg).await, "/api/files/..%2Fsecret.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "outside the base dir");
}

#[tokio::test]
async fn missing_file_reports_error_in_body() {
    let root = tempfile::tempdir().expect("tempdir");
    let cfg = Config {
        data_dir: format!("{}/", root.path().display()),
        ..Config::default()
    };
    let (status, _, body) = get(app_with(&cfg).await, "/api/files/absent.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Error reading file: "), "body: {body}");
}

#[cfg(unix)]
#[tokio::test]
async fn ping_collects_stdout_lines() {
    let cfg = Config {
        ping_command: "printf 'a\\nb' && echo".to_string(),
        ..Config::default()
    };
    let (status, _, body) = get(app_with(&cfg).await, "/api/ping?host=c").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "a\nbc\n");
}

#[cfg(unix)]
#[tokio::test]
async fn ping_keeps_lines_around_invalid_utf8() {
    let cfg = Config {
        ping_command: "echo first; printf '\\377\\n'; echo".to_string(),
        ..Config::default()
    };
    let (status, _, body) = get(app_with(&cfg).await, "/api/ping?host=last").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "first\n\u{FFFD}\nlast\n");
}

#[cfg(unix)]
#[tokio::test]
async fn shell_metacharacter_in_host_runs_extra_command() {
    let app = app_with(&Config::default()).await;
    // ; echo injected
    let (status, _, body) = get(app, "/api/ping?host=%3B%20echo%20injected").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("injected\n"), "body: {body}");
}
