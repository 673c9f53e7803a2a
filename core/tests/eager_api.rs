//! End-to-end suite over the eager transport against the live fixture
//! server. Mirrors the deferred suite case for case; the call bodies are
//! identical because both transports sit behind the same surface.

use std::time::Duration;

use serde_json::{json, Value};
use unihttp::{
    api, ApiContext, EagerTransport, Method, RequestConfig, RequestDescriptor, ResponseType,
    TracingReporter,
};

async fn spawn_fixture() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(fixture_server::run(listener));
    format!("http://{addr}")
}

fn context() -> ApiContext {
    ApiContext::new(EagerTransport::new()).with_reporter(TracingReporter)
}

#[tokio::test(flavor = "multi_thread")]
async fn get_head_post_put_patch_delete_in_single_case() {
    let base_url = spawn_fixture().await;
    let cx = context();

    let response = api::get(&cx, &format!("{base_url}/posts/1"), RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);

    let response = api::head(&cx, &format!("{base_url}/posts/1"), RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.body().await.unwrap().is_none());

    let config = RequestConfig::new()
        .data(json!({"title": "foo", "body": "bar", "userId": 1}))
        .header("Content-type", "application/json; charset=UTF-8");
    let response = api::post(&cx, &format!("{base_url}/posts"), config).await.unwrap();
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 101);

    let config = RequestConfig::new()
        .data(json!({"id": 1, "title": "foo", "body": "bar", "userId": 1}))
        .header("Content-type", "application/json; charset=UTF-8")
        .param("_limit", 1000)
        .param("_details", true)
        .timeout(Duration::from_millis(2000));
    let response = api::put(&cx, &format!("{base_url}/posts/1"), config).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 1);

    let config = RequestConfig::new()
        .data(json!({"title": "hello"}))
        .header("Content-type", "application/json; charset=UTF-8");
    let response = api::patch(&cx, &format!("{base_url}/posts/1"), config).await.unwrap();
    assert_eq!(response.status(), 200);

    let response = api::delete(&cx, &format!("{base_url}/posts/1"), RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test(flavor = "multi_thread")]
async fn generic_request_defaults_to_get() {
    let base_url = spawn_fixture().await;
    let cx = context();

    let descriptor = RequestDescriptor::new(format!("{base_url}/posts"))
        .config(RequestConfig::new().param("_limit", 20000).param("_details", true));
    let response = api::request(&cx, descriptor).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Vec<Value> = response.json().await.unwrap();
    assert!(body.len() > 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn post_with_full_config() {
    let base_url = spawn_fixture().await;
    let cx = context();

    let config = RequestConfig::new()
        .data(json!({"id": 1, "title": "foo", "body": "bar", "userId": 1}))
        .header("Content-type", "application/json; charset=UTF-8")
        .param("_limit", 1000)
        .param("_details", true)
        .timeout(Duration::from_millis(2000))
        .response_type(ResponseType::Json)
        .auth("john.wick", "babayaga");
    let response = api::post(&cx, &format!("{base_url}/posts"), config).await.unwrap();
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 101);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_is_idempotent() {
    let base_url = spawn_fixture().await;
    let cx = context();
    let url = format!("{base_url}/posts/1");

    let first = api::get(&cx, &url, RequestConfig::new()).await.unwrap();
    let second = api::get(&cx, &url, RequestConfig::new()).await.unwrap();
    assert_eq!(first.status(), second.status());
    let first_body: Value = first.json().await.unwrap();
    let second_body: Value = second.json().await.unwrap();
    assert_eq!(first_body, second_body);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_resource_is_404_not_an_error() {
    let base_url = spawn_fixture().await;
    let cx = context();

    let response = api::get(
        &cx,
        &format!("{base_url}/this-is-a-non-sense-endpoint"),
        RequestConfig::new(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), 404);
    assert!(!response.ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn acceptance_predicate_admits_a_404() {
    let base_url = spawn_fixture().await;
    let cx = context();

    let config = RequestConfig::new().validate_status(|status| status == 404);
    let response = api::get(&cx, &format!("{base_url}/posts/9999"), config)
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert!(response.ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn each_call_result_is_independently_assertable() {
    let base_url = spawn_fixture().await;
    let cx = context();

    let patch_response = api::patch(
        &cx,
        &format!("{base_url}/posts/1"),
        RequestConfig::new().data(json!({"title": "hello"})),
    )
    .await
    .unwrap();
    let delete_response = api::delete(&cx, &format!("{base_url}/posts/1"), RequestConfig::new())
        .await
        .unwrap();

    assert_eq!(patch_response.status(), 200);
    assert_eq!(delete_response.status(), 200);
    let deleted: Value = delete_response.json().await.unwrap();
    assert_eq!(deleted, json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn generic_request_honors_an_explicit_method() {
    let base_url = spawn_fixture().await;
    let cx = context();

    let descriptor = RequestDescriptor::new(format!("{base_url}/posts"))
        .method(Method::Post)
        .config(RequestConfig::new().data(json!({"title": "foo"})));
    let response = api::request(&cx, descriptor).await.unwrap();
    assert_eq!(response.status(), 201);
}
