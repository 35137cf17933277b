mod common;

use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn create_returns_201_and_becomes_current() {
    let app = TestApp::spawn().await;

    let created = app.create("Georgia", 16).await;
    assert_eq!(created["fontFamily"], "Georgia");
    assert_eq!(created["fontSize"], 16);
    assert!(created["id"].is_string());

    let current: Value = app
        .get("/api/font-preferences/current")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(current, created);

    let newer = app.create("Times New Roman", 20).await;
    let current: Value = app
        .get("/api/font-preferences/current")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(current["id"], newer["id"]);
}

#[tokio::test]
async fn current_is_404_before_any_create() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/font-preferences/current").await;

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "No font preferences found. Please create font preferences first"
    );
}

#[tokio::test]
async fn create_validates_family_and_size() {
    let app = TestApp::spawn().await;

    for body in [
        json!({ "fontFamily": "Arial", "fontSize": 11 }),
        json!({ "fontFamily": "Arial", "fontSize": 25 }),
        json!({ "fontFamily": "Comic Sans", "fontSize": 16 }),
        json!({ "fontFamily": "Arial" }),
        json!({ "fontSize": 16 }),
    ] {
        let response = app.post_json("/api/font-preferences", &body).await;
        assert_eq!(response.status().as_u16(), 400, "body: {}", body);
    }

    assert_eq!(
        app.get("/api/font-preferences/current").await.status().as_u16(),
        404
    );
}

#[tokio::test]
async fn get_by_id_and_unknown_id() {
    let app = TestApp::spawn().await;
    let created = app.create("Verdana", 14).await;

    let fetched: Value = app
        .get(&format!("/api/font-preferences/{}", created["id"].as_str().unwrap()))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    let response = app.get("/api/font-preferences/unknown").await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Font preference not found");
}

#[tokio::test]
async fn partial_update_keeps_other_field() {
    let app = TestApp::spawn().await;
    let created = app.create("Courier", 18).await;
    let path = format!("/api/font-preferences/{}", created["id"].as_str().unwrap());

    let response = app.put_json(&path, &json!({ "fontSize": 22 })).await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();

    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["fontFamily"], "Courier");
    assert_eq!(updated["fontSize"], 22);

    let invalid = app.put_json(&path, &json!({ "fontFamily": "Papyrus" })).await;
    assert_eq!(invalid.status().as_u16(), 400);

    let fetched: Value = app.get(&path).await.json().await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_unknown_id_is_404_and_changes_nothing() {
    let app = TestApp::spawn().await;
    let created = app.create("Arial", 16).await;

    let response = app
        .put_json(
            "/api/font-preferences/unknown",
            &json!({ "fontFamily": "Georgia", "fontSize": 20 }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let current: Value = app
        .get("/api/font-preferences/current")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(current, created);
}

#[tokio::test]
async fn deleting_current_clears_pointer() {
    let app = TestApp::spawn().await;
    let created = app.create("Georgia", 16).await;
    let path = format!("/api/font-preferences/{}", created["id"].as_str().unwrap());

    let response = app.delete(&path).await;
    assert_eq!(response.status().as_u16(), 204);

    assert_eq!(app.get(&path).await.status().as_u16(), 404);
    assert_eq!(
        app.get("/api/font-preferences/current").await.status().as_u16(),
        404
    );
    assert_eq!(app.delete(&path).await.status().as_u16(), 404);
}

#[tokio::test]
async fn deleting_older_record_keeps_current() {
    let app = TestApp::spawn().await;
    let older = app.create("Arial", 12).await;
    let newer = app.create("Verdana", 24).await;

    let response = app
        .delete(&format!("/api/font-preferences/{}", older["id"].as_str().unwrap()))
        .await;
    assert_eq!(response.status().as_u16(), 204);

    let current: Value = app
        .get("/api/font-preferences/current")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(current, newer);
}

#[tokio::test]
async fn router_reports_missing_current_without_a_listener() {
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use stylist_service::services::InMemoryFontPreferenceStore;
    use stylist_service::{build_router, AppState};
    use tower::ServiceExt;

    let state = AppState {
        config: common::test_config(),
        store: Arc::new(InMemoryFontPreferenceStore::new()),
    };

    let response = build_router(state)
        .oneshot(
            Request::builder()
                .uri("/api/font-preferences/current")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}
