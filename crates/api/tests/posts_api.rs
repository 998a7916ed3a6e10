mod common;

use common::{TestApp, SEEDED_POSTS};
use reqwest::StatusCode;
use serde_json::{json, Value};

const LONG_CONTENT: &str = "Lorem ipsum dolor sit amet, consectetur adipisicing elit, sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in \
reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint \
occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

async fn list(app: &TestApp) -> Vec<Value> {
    let res = app.client.get(app.url("/posts")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn get_returns_all_existing_posts() {
    let app = TestApp::spawn().await;

    let posts = list(&app).await;
    assert!(posts.len() >= SEEDED_POSTS);
    for post in &posts {
        for key in ["id", "author", "title", "content", "created"] {
            assert!(post.get(key).is_some(), "missing {key} in {post}");
        }
    }

    app.tear_down().await;
}

#[tokio::test]
async fn post_creates_a_new_post() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(app.url("/posts"))
        .json(&json!({
            "author": {"firstName": "Jane", "lastName": "Doe"},
            "title": "T",
            "content": "C",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let created: Value = res.json().await.unwrap();
    assert_eq!(created["title"], "T");
    assert_eq!(created["content"], "C");
    assert_eq!(created["author"], "Jane Doe");

    let id = created["id"].as_str().unwrap();
    let ids: Vec<String> = list(&app)
        .await
        .iter()
        .map(|post| post["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.iter().filter(|other| *other == id).count(), 1);
    assert!(app.seeded.iter().all(|post| post.id.to_string() != id));

    app.tear_down().await;
}

#[tokio::test]
async fn post_without_content_is_bad_request() {
    let app = TestApp::spawn().await;

    let res = app
        .client
        .post(app.url("/posts"))
        .json(&json!({"title": "Only a title"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(list(&app).await.len(), SEEDED_POSTS);

    app.tear_down().await;
}

#[tokio::test]
async fn delete_removes_post() {
    let app = TestApp::spawn().await;
    let target = app.seeded[0].id;

    let res = app
        .client
        .delete(app.url(&format!("/posts/{target}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.unwrap().is_empty());

    let remaining = list(&app).await;
    assert!(remaining
        .iter()
        .all(|post| post["id"] != json!(target.to_string())));

    let res = app
        .client
        .get(app.url(&format!("/posts/{target}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    app.tear_down().await;
}

#[tokio::test]
async fn put_updates_post() {
    let app = TestApp::spawn().await;
    let original = app.seeded[0].clone();

    let res = app
        .client
        .put(app.url(&format!("/posts/{}", original.id)))
        .json(&json!({
            "id": original.id.to_string(),
            "author": {"firstName": "Billy", "lastName": "Thorn"},
            "title": "Updated title",
            "content": LONG_CONTENT,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app
        .client
        .get(app.url(&format!("/posts/{}", original.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["id"], json!(original.id.to_string()));
    assert_eq!(updated["author"], "Billy Thorn");
    assert_eq!(updated["title"], "Updated title");
    assert_eq!(updated["content"], LONG_CONTENT);
    assert_eq!(updated["created"], serde_json::to_value(original.created).unwrap());

    app.tear_down().await;
}

#[tokio::test]
async fn put_with_mismatched_id_is_bad_request() {
    let app = TestApp::spawn().await;
    let (first, second) = (app.seeded[0].id, app.seeded[1].id);

    let res = app
        .client
        .put(app.url(&format!("/posts/{first}")))
        .json(&json!({"id": second.to_string(), "title": "Nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["statusCode"], 400);

    app.tear_down().await;
}

#[tokio::test]
async fn health_reports_store_connected() {
    let app = TestApp::spawn().await;

    let res = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["store"], "connected");

    app.tear_down().await;
}
