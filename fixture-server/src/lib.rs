//! Local stand-in for the public demo REST service the suites exercise.
//!
//! Serves the documented fixture behavior: 100 canned posts, creation always
//! answers 201 with id 101 without persisting anything, and replace/merge
//! responses echo the submitted payload. Keeping the fixtures immutable
//! means every test case sees the same data regardless of ordering.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

/// A canned post, shaped like the demo service's fixtures.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

pub type Fixtures = Arc<Vec<Post>>;

pub const POST_COUNT: u64 = 100;

/// Id assigned to every created post, per the demo service's documented
/// behavior: `POST /posts` answers 201 with id 101 regardless of payload.
pub const CREATED_ID: u64 = 101;

fn seed_posts() -> Vec<Post> {
    (1..=POST_COUNT)
        .map(|id| Post {
            user_id: (id - 1) / 10 + 1,
            id,
            title: format!("fixture post {id}"),
            body: format!("body of fixture post {id}"),
        })
        .collect()
}

pub fn app() -> Router {
    let fixtures: Fixtures = Arc::new(seed_posts());
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(replace_post).patch(merge_post).delete(delete_post),
        )
        .fallback(not_found)
        .with_state(fixtures)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts(
    State(fixtures): State<Fixtures>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Post>> {
    let limit = params
        .get("_limit")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(fixtures.len());
    Json(fixtures.iter().take(limit).cloned().collect())
}

async fn get_post(
    State(fixtures): State<Fixtures>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, (StatusCode, Json<Value>)> {
    fixtures
        .iter()
        .find(|post| post.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(empty_not_found)
}

async fn create_post(Json(input): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut created = into_object(input);
    created.insert("id".to_string(), json!(CREATED_ID));
    (StatusCode::CREATED, Json(Value::Object(created)))
}

async fn replace_post(
    State(fixtures): State<Fixtures>,
    Path(id): Path<u64>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if !fixtures.iter().any(|post| post.id == id) {
        return Err(empty_not_found());
    }
    let mut replaced = into_object(input);
    replaced.insert("id".to_string(), json!(id));
    Ok(Json(Value::Object(replaced)))
}

async fn merge_post(
    State(fixtures): State<Fixtures>,
    Path(id): Path<u64>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let post = fixtures
        .iter()
        .find(|post| post.id == id)
        .ok_or_else(empty_not_found)?;
    let mut merged = match serde_json::to_value(post) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (name, value) in into_object(input) {
        merged.insert(name, value);
    }
    Ok(Json(Value::Object(merged)))
}

// Deletes are acknowledged but never persisted, like the demo service.
async fn delete_post(Path(_id): Path<u64>) -> Json<Value> {
    Json(json!({}))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    empty_not_found()
}

fn empty_not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

fn into_object(input: Value) -> Map<String, Value> {
    match input {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_covers_the_full_fixture_range() {
        let posts = seed_posts();
        assert_eq!(posts.len(), POST_COUNT as usize);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[99].id, 100);
    }

    #[test]
    fn posts_serialize_with_camel_case_user_id() {
        let post = Post {
            user_id: 1,
            id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["userId"], 1);
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn non_object_payloads_collapse_to_an_empty_object() {
        assert!(into_object(json!([1, 2, 3])).is_empty());
        assert!(into_object(json!("text")).is_empty());
    }
}
