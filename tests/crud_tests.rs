//! End-to-end checks against a real database. Run with
//! `TEST_DATABASE_URL=... cargo test -- --ignored --test-threads=1`.


use reqwest::{header, StatusCode};
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
#[ignore]
async fn wrong_password_form_login_returns_to_login_page() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/login"))
        .form(&[("username", ADMIN_USERNAME), ("password", "nope"), ("next", "/admin/skills")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/login?error=invalid_credentials&next=%2Fadmin%2Fskills"
    );
}

#[actix_rt::test]
#[ignore]
async fn json_login_returns_session_body() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/login"))
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[actix_rt::test]
#[ignore]
async fn skill_tag_endpoint_creates_once_then_finds() {
    let app = TestApp::spawn().await;
    app.sign_in().await;

    let first = app
        .client
        .post(app.url("/admin/api/skills"))
        .json(&json!({ "name": "Rust" }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let created: Value = first.json().await.unwrap();

    let second = app
        .client
        .post(app.url("/admin/api/skills"))
        .json(&json!({ "name": "rust" }))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let found: Value = second.json().await.unwrap();
    assert_eq!(found["id"], created["id"]);

    let matches: Vec<Value> = app
        .client
        .get(app.url("/admin/api/skills?q=RU"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], "Rust");
}

#[actix_rt::test]
#[ignore]
async fn experience_form_round_trip_refreshes_cached_cards() {
    let app = TestApp::spawn().await;
    app.sign_in().await;

    let cards: Vec<Value> = app
        .client
        .get(app.url("/api/v1/experiences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cards.is_empty());

    let response = app
        .client
        .post(app.url("/admin/experiences"))
        .form(&[
            ("role", "Backend Engineer"),
            ("company", "Acme"),
            ("start_date", "01/2022"),
            ("end_date", ""),
            ("is_current", "on"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin/experiences");

    let cards: Vec<Value> = app
        .client
        .get(app.url("/api/v1/experiences"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["company"], "Acme");
    assert!(cards[0]["period"].as_str().unwrap().ends_with("Present"));
}

#[actix_rt::test]
#[ignore]
async fn course_with_unknown_skill_is_a_conflict() {
    let app = TestApp::spawn().await;
    app.sign_in().await;

    let response = app
        .client
        .post(app.url("/admin/courses"))
        .json(&json!({
            "name": "Async Rust",
            "course_type": "online",
            "institution": "Rust Foundation",
            "completed_on": "06/2024",
            "skill_ids": [uuid::Uuid::new_v4()]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
#[ignore]
async fn deleting_a_missing_language_is_not_found() {
    let app = TestApp::spawn().await;
    app.sign_in().await;

    let response = app
        .client
        .delete(app.url(&format!("/admin/languages/{}", uuid::Uuid::new_v4())))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
