//! End-to-end tests of the directory middleware over real HTTP.

use std::time::Duration;

use autodir::config::AppConfig;
use autodir::http::DIRECTORY_MEDIA_TYPE;
use autodir::routing::ExcludedPrefixes;
use autodir::Routes;
use axum::routing::get;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_root_lists_top_level_segments() {
    let server = common::start_demo_server(AppConfig::default()).await;
    let res = common::client().get(server.url("/")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()[CONTENT_TYPE], DIRECTORY_MEDIA_TYPE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "dir": ["greet/", "random"] }));
}

#[tokio::test]
async fn test_nested_directory_and_leaves() {
    let server = common::start_demo_server(AppConfig::default()).await;
    let client = common::client();

    let body: Value = client
        .get(server.url("/greet"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({ "dir": ["goodbye", "hello"] }));

    let res = client.get(server.url("/greet/hello")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Hello, world!\n");

    let res = client.get(server.url("/random")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap().trim_end().len(), 24);
}

#[tokio::test]
async fn test_unknown_paths_are_not_found() {
    let server = common::start_demo_server(AppConfig::default()).await;
    let client = common::client();

    for path in ["/nope", "/greet/hello/deeper", "/static"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), 404, "path {}", path);
        assert_eq!(res.text().await.unwrap(), "Not found");
    }
}

#[tokio::test]
async fn test_static_assets_pass_through() {
    let server = common::start_demo_server(AppConfig::default()).await;
    let res = common::client()
        .get(server.url("/static/robots.txt"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().starts_with("User-agent"));
}

#[tokio::test]
async fn test_head_reports_directory_media_type() {
    let server = common::start_demo_server(AppConfig::default()).await;
    let res = common::client().head(server.url("/greet")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()[CONTENT_TYPE], DIRECTORY_MEDIA_TYPE);
}

#[tokio::test]
async fn test_request_id_generated_and_echoed() {
    let server = common::start_demo_server(AppConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    let res = client
        .get(server.url("/greet"))
        .header("x-request-id", "test-id-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "test-id-1");
}

#[tokio::test]
async fn test_config_reload_changes_listing() {
    let server = common::start_demo_server(AppConfig::default()).await;

    let mut config = AppConfig::default();
    config.autodir.excluded_prefixes = ExcludedPrefixes::none();
    server.config_tx.send(config).unwrap();

    // The reload task applies updates asynchronously
    let client = common::client();
    let mut listed = Value::Null;
    for _ in 0..50 {
        listed = client
            .get(server.url("/"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if listed["dir"].as_array().map(|d| d.len()) == Some(3) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(listed, serde_json::json!({ "dir": ["greet/", "random", "static/"] }));
}

#[tokio::test]
async fn test_custom_routes_with_parameters() {
    let routes = Routes::new()
        .route("/api/v1/users", get(|| async { "users" }))
        .route("/api/v1/users/{id}", get(|| async { "user" }))
        .route("/api/v1/users/{id}/posts", get(|| async { "posts" }))
        .route("/api/v2/health", get(|| async { "ok" }));
    let server = common::start_routes_server(AppConfig::default(), routes).await;
    let client = common::client();

    let body: Value = client.get(server.url("/api")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "dir": ["v1/", "v2/"] }));

    // `/api/v1/users` is itself a route, so it passes through
    let res = client.get(server.url("/api/v1/users")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "users");

    let body: Value = client.get(server.url("/api/v1")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "dir": ["users/"] }));

    let res = client.get(server.url("/api/v1/users/7/posts")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "posts");
}
