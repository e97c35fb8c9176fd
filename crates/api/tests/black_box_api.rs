use std::sync::Arc;

use chrono::Duration;
use reqwest::{header, redirect, StatusCode};
use serde_json::json;

use stockroom_api::app::{build_router, services::AppServices};
use stockroom_infra::AppConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(AppConfig::default()).await
    }

    async fn spawn_with(config: AppConfig) -> Self {
        // Same router as prod over an in-memory collection, on an ephemeral port.
        let app = build_router(Arc::new(AppServices::in_memory(config)));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

fn issued_owner(res: &reqwest::Response) -> String {
    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("owner cookie missing")
        .to_str()
        .unwrap();
    let pair = set_cookie.split(';').next().unwrap();
    pair.strip_prefix("user_id=").unwrap().to_string()
}

fn cookie(owner: &str) -> String {
    format!("user_id={owner}")
}

fn cube() -> serde_json::Value {
    json!({
        "name": "Cube",
        "description": "A 6 sided shape",
        "drawing": "cube.dwg",
        "quantity": 10,
        "status": "Active",
    })
}

async fn api_insert(
    client: &reqwest::Client,
    srv: &TestServer,
    owner: &str,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(srv.url(&format!("/api/insert?user_id={owner}")))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_ok_without_cookie() {
    let srv = TestServer::spawn().await;

    let res = client().get(srv.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn first_visit_issues_owner_cookie_and_later_visits_keep_it() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client.get(srv.url("/whoami")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let owner = issued_owner(&res);
    assert!(uuid::Uuid::parse_str(&owner).is_ok());
    let set_cookie = res.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(set_cookie.contains("Max-Age=1209600"));

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["owner_id"], owner.as_str());

    let res = client
        .get(srv.url("/whoami"))
        .header(header::COOKIE, cookie(&owner))
        .send()
        .await
        .unwrap();
    assert_eq!(issued_owner(&res), owner);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["owner_id"], owner.as_str());
}

#[tokio::test]
async fn malformed_cookie_is_replaced() {
    let srv = TestServer::spawn().await;

    let res = client()
        .get(srv.url("/whoami"))
        .header(header::COOKIE, "user_id=not valid!")
        .send()
        .await
        .unwrap();

    assert_ne!(issued_owner(&res), "not valid!");
}

#[tokio::test]
async fn root_redirects_to_app() {
    let srv = TestServer::spawn().await;

    let res = client().get(srv.url("/")).send().await.unwrap();

    assert!(res.status().is_redirection());
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/app/");
}

#[tokio::test]
async fn demo_seed_then_search_finds_bolts() {
    let srv = TestServer::spawn().await;
    let client = client();
    let owner = "demo-owner";

    let res = client
        .post(srv.url("/demo/insert"))
        .header(header::COOKIE, cookie(owner))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");

    let res = client
        .post(srv.url("/app/search"))
        .header(header::COOKIE, cookie(owner))
        .form(&[("search", "bolt")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["count"], 5);
    assert_eq!(body["search"], "bolt");
    assert_eq!(body["current_page"], 1);

    // The first page is capped at ITEMS_PER_PAGE, the rest follows on page 2.
    let res = client
        .get(srv.url("/app/?page=1"))
        .header(header::COOKIE, cookie(owner))
        .send()
        .await
        .unwrap();
    let first: serde_json::Value = res.json().await.unwrap();
    assert_eq!(first["count"], 30);
    assert_eq!(first["items"][0]["name"], "Cube");

    let res = client
        .get(srv.url("/app/items?page=2&search=None"))
        .header(header::COOKIE, cookie(owner))
        .send()
        .await
        .unwrap();
    let second: serde_json::Value = res.json().await.unwrap();
    assert_eq!(second["count"], 6);
    assert_eq!(second["search"], serde_json::Value::Null);
}

#[tokio::test]
async fn item_lookup_distinguishes_malformed_from_absent() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client.get(srv.url("/api/item/not-an-id")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");

    let absent = uuid::Uuid::now_v7();
    let res = client
        .get(srv.url(&format!("/api/item/{absent}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_insert_is_owner_isolated() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = api_insert(&client, &srv, "u1", json!([cube(), cube()])).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Items added successfully");
    assert_eq!(body["item_ids"].as_array().unwrap().len(), 2);

    let res = client.get(srv.url("/api/items?user_id=u1")).send().await.unwrap();
    let items: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["owner_id"] == "u1"));

    let res = client.get(srv.url("/api/items?user_id=u2")).send().await.unwrap();
    let items: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(items.is_empty());

    let res = client
        .get(srv.url("/app/"))
        .header(header::COOKIE, cookie("u2"))
        .send()
        .await
        .unwrap();
    let page: serde_json::Value = res.json().await.unwrap();
    assert_eq!(page["count"], 0);
}

#[tokio::test]
async fn api_insert_reports_partial_and_total_failure() {
    let srv = TestServer::spawn().await;
    let client = client();

    let mut negative = cube();
    negative["quantity"] = json!(-1);

    let res = api_insert(&client, &srv, "u1", json!([cube(), negative.clone()])).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["item_ids"].as_array().unwrap().len(), 1);
    assert_eq!(body["failures"][0]["index"], 1);

    let res = api_insert(&client, &srv, "u1", json!([negative])).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insert_failed");
}

#[tokio::test]
async fn add_then_update_keeps_name() {
    let srv = TestServer::spawn().await;
    let client = client();
    let owner = "editor";

    let res = client
        .post(srv.url("/app/add-item"))
        .header(header::COOKIE, cookie(owner))
        .form(&[
            ("name_in", "Cube"),
            ("description_in", "A 6 sided shape"),
            ("drawing_in", "cube.dwg"),
            ("quantity_in", "10"),
            ("status_in", "Active"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = client.get(srv.url(&format!("/api/items?user_id={owner}"))).send().await.unwrap();
    let items: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(items.len(), 1);
    let id = items[0]["id"].as_str().unwrap().to_string();

    let res = client
        .get(srv.url(&format!("/app/edit-item/{id}")))
        .header(header::COOKIE, cookie(owner))
        .send()
        .await
        .unwrap();
    let view: serde_json::Value = res.json().await.unwrap();
    assert_eq!(view["item"]["quantity"], 10);
    assert!(view["field_specs"].is_array());

    let res = client
        .put(srv.url(&format!("/app/update-item/{id}")))
        .header(header::COOKIE, cookie(owner))
        .form(&[
            ("description_in", "A 6 sided shape"),
            ("drawing_in", "cube.dwg"),
            ("quantity_in", "5"),
            ("status_in", "Slow"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view: serde_json::Value = res.json().await.unwrap();
    assert_eq!(view["item"]["name"], "Cube");
    assert_eq!(view["item"]["quantity"], 5);
    assert_eq!(view["item"]["status"], "Slow");
}

#[tokio::test]
async fn add_item_rejects_invalid_form() {
    let srv = TestServer::spawn().await;

    let res = client()
        .post(srv.url("/app/add-item"))
        .header(header::COOKIE, cookie("editor"))
        .form(&[
            ("name_in", "   "),
            ("description_in", ""),
            ("drawing_in", ""),
            ("quantity_in", "1"),
            ("status_in", "Active"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn update_of_absent_item_is_not_found() {
    let srv = TestServer::spawn().await;
    let absent = uuid::Uuid::now_v7();

    let res = client()
        .put(srv.url(&format!("/app/update-item/{absent}")))
        .header(header::COOKIE, cookie("editor"))
        .form(&[
            ("description_in", ""),
            ("drawing_in", ""),
            ("quantity_in", "1"),
            ("status_in", "Active"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = api_insert(&client, &srv, "u1", json!([cube()])).await;
    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["item_ids"][0].as_str().unwrap().to_string();

    for _ in 0..2 {
        let res = client
            .delete(srv.url(&format!("/app/delete-item/{id}")))
            .header(header::COOKIE, cookie("u1"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client.get(srv.url(&format!("/api/item/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cleanup_keeps_items_inside_retention_window() {
    let srv = TestServer::spawn().await;
    let client = client();

    api_insert(&client, &srv, "u1", json!([cube()])).await;

    let res = client.post(srv.url("/api/cleanup")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Old Item removed");
    assert_eq!(body["removed"], 0);
}

#[tokio::test]
async fn cleanup_with_zero_retention_purges_everything_written() {
    let config = AppConfig {
        retention: Duration::zero(),
        ..AppConfig::default()
    };
    let srv = TestServer::spawn_with(config).await;
    let client = client();

    api_insert(&client, &srv, "u1", json!([cube()])).await;
    api_insert(&client, &srv, "u2", json!([cube(), cube()])).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let res = client.post(srv.url("/api/cleanup")).send().await.unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["removed"], 3);

    let res = client.get(srv.url("/api/items?user_id=u2")).send().await.unwrap();
    let items: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(items.is_empty());
}
