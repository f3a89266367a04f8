mod common;

use axum_test::TestServer;
use chrono::{Duration, Utc};
use dynamic_links::domain::repositories::LinkRepository;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_success() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/admin/create")
        .add_header("Authorization", common::ADMIN_AUTH)
        .json(&json!({
            "universal_link": "https://trii.co/app/product?id=987",
            "deep_link": "",
            "title": "Spring promo"
        }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    let id = json["id"].as_str().unwrap();
    assert_eq!(id.len(), 6);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(json["short_url"], format!("https://go.trii.co/{id}"));
    assert_eq!(json["deeplink"], "triiapp://product?id=987");
    assert_eq!(json["deep_link"], Value::Null);
    assert_eq!(json["title"], "Spring promo");
    assert_eq!(
        json["ios_store"],
        "https://apps.apple.com/co/app/trii/id1513826307"
    );
    assert_eq!(json["click_count"], 0);
}

#[tokio::test]
async fn test_create_link_treats_blank_universal_link_as_absent() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/admin/create")
        .add_header("Authorization", common::ADMIN_AUTH)
        .json(&json!({
            "universal_link": "   ",
            "deep_link": "triiapp://home",
            "ios_store": " "
        }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<Value>();
    assert_eq!(json["universal_link"], Value::Null);
    assert_eq!(json["deep_link"], "triiapp://home");
    assert_eq!(
        json["ios_store"],
        "https://apps.apple.com/co/app/trii/id1513826307"
    );
}

#[tokio::test]
async fn test_create_then_info_round_trip() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let created = server
        .post("/admin/create")
        .add_header("Authorization", common::ADMIN_AUTH)
        .json(&json!({
            "deep_link": "product?id=5",
            "android_store": "https://play.google.com/store/apps/details?id=com.other",
            "description": "Five"
        }))
        .await
        .json::<Value>();
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/info/{id}")).await;

    response.assert_status_ok();
    let info = response.json::<Value>();
    assert_eq!(info["id"], id);
    assert_eq!(info["universal_link"], Value::Null);
    assert_eq!(info["deep_link"], "product?id=5");
    assert_eq!(
        info["android_store"],
        "https://play.google.com/store/apps/details?id=com.other"
    );
    assert_eq!(info["description"], "Five");
    assert_eq!(info["deeplink"], "triiapp://product?id=5");
    assert_eq!(info["click_count"], 0);
    assert_eq!(info["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_create_link_requires_auth() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/admin/create")
        .json(&json!({ "universal_link": "https://trii.co/app/x" }))
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(
        response
            .header("www-authenticate")
            .to_str()
            .unwrap()
            .starts_with("Basic")
    );
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_create_link_wrong_password() {
    let (state, repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    // admin:wrong
    let response = server
        .post("/admin/create")
        .add_header("Authorization", "Basic YWRtaW46d3Jvbmc=")
        .json(&json!({ "universal_link": "https://trii.co/app/x" }))
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_link_without_destination_is_rejected() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/admin/create")
        .add_header("Authorization", common::ADMIN_AUTH)
        .json(&json!({ "universal_link": "", "deep_link": "", "title": "Nothing" }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_link_invalid_url_is_rejected() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .post("/admin/create")
        .add_header("Authorization", common::ADMIN_AUTH)
        .json(&json!({ "universal_link": "not a url" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let (state, repo, _rx) = common::create_test_state();
    let now = Utc::now();
    common::create_test_link_at(
        &repo,
        "old000",
        Some("https://trii.co/app/a"),
        None,
        now - Duration::hours(2),
    )
    .await;
    common::create_test_link_at(&repo, "new000", None, Some("triiapp://b"), now).await;
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .get("/admin/links")
        .add_header("Authorization", common::ADMIN_AUTH)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    let links = json.as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["id"], "new000");
    assert_eq!(links[0]["deeplink"], "triiapp://b");
    assert_eq!(links[1]["id"], "old000");
    assert_eq!(links[1]["short_url"], "https://go.trii.co/old000");
}

#[tokio::test]
async fn test_list_links_requires_auth() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/admin/links").await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_info_not_found() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server.get("/info/nope00").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_deeplink_endpoint() {
    let (state, repo, _rx) = common::create_test_state();
    common::create_test_link(
        &repo,
        "abc123",
        Some("https://trii.co/app/wallet/deposit?x=1"),
        None,
    )
    .await;
    let server = TestServer::new(common::test_router(state)).unwrap();

    let response = server
        .get("/deeplink/abc123")
        .add_header("User-Agent", common::IPHONE_UA)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["deeplink"], "triiapp://wallet/deposit?x=1");
    assert_eq!(
        json["universal_link"],
        "https://trii.co/app/wallet/deposit?x=1"
    );
    assert_eq!(json["deep_link"], Value::Null);
    assert!(json.get("click_count").is_none());
}

#[tokio::test]
async fn test_deeplink_defaults_to_home() {
    let (state, repo, _rx) = common::create_test_state();
    common::create_test_link(&repo, "abc123", Some("https://trii.co/promo"), None).await;
    let server = TestServer::new(common::test_router(state)).unwrap();

    let json = server.get("/deeplink/abc123").await.json::<Value>();

    assert_eq!(json["deeplink"], "triiapp://home");
}
