//! In-process stand-in for the JSONPlaceholder API used by the client tests.
//!
//! Serves a fixed set of posts and users, echoes created posts the way the
//! real service does (`id: 101`, status 201), and exposes a few routes that
//! misbehave on purpose: an empty list, a body larger than 10 MiB, bodies
//! that are not JSON or not UTF-8, and 500s.

use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Id JSONPlaceholder assigns to every created post.
pub const CREATED_POST_ID: u64 = 101;

/// Number of 1 KiB strings served by `/big`; the body ends up above 11 MiB.
pub const BIG_ITEMS: usize = 11 * 1024;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

pub fn posts() -> Vec<Post> {
    vec![
        Post {
            user_id: 1,
            id: 1,
            title: "sunt aut facere".to_string(),
            body: "quia et suscipit".to_string(),
        },
        Post {
            user_id: 1,
            id: 2,
            title: "qui est esse".to_string(),
            body: "est rerum tempore, vitae".to_string(),
        },
        Post {
            user_id: 2,
            id: 3,
            title: "ea molestias quasi".to_string(),
            body: "et iusto sed quo iure".to_string(),
        },
    ]
}

pub fn app() -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .route("/users/{id}", get(get_user))
        .route("/empty", get(empty))
        .route("/big", get(big))
        .route("/broken", get(broken))
        .route("/binary", get(binary))
        .route("/fail", get(fail))
        .route("/fail-binary", get(fail_binary))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_posts() -> Json<Vec<Post>> {
    Json(posts())
}

/// Unknown ids answer 404 with an empty object, like the real service.
async fn get_post(Path(id): Path<u64>) -> Response {
    match posts().into_iter().find(|post| post.id == id) {
        Some(post) => Json(post).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

/// Echo the submitted object back with the assigned id. An empty body is
/// accepted and yields just the id.
async fn create_post(headers: HeaderMap, body: Bytes) -> Response {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if !is_json {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "expected application/json").into_response();
    }

    let mut created = if body.is_empty() {
        serde_json::Map::new()
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(map)) => map,
            Ok(_) => serde_json::Map::new(),
            Err(_) => return (StatusCode::BAD_REQUEST, "malformed JSON body").into_response(),
        }
    };
    created.insert("id".to_string(), json!(CREATED_POST_ID));
    (StatusCode::CREATED, Json(Value::Object(created))).into_response()
}

async fn get_user(Path(id): Path<u64>) -> Response {
    if id != 1 {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }
    Json(json!({
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "address": {
            "street": "Kulas Light",
            "city": "Gwenborough",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": null
    }))
    .into_response()
}

async fn empty() -> Json<Vec<Value>> {
    Json(Vec::new())
}

async fn big() -> Json<Vec<String>> {
    Json(vec!["x".repeat(1024); BIG_ITEMS])
}

async fn broken() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        "{\"id\": 1,",
    )
        .into_response()
}

/// Well-formed JSON except for a byte that is not UTF-8 inside a string.
async fn binary() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Bytes::from_static(b"{\"name\":\"caf\xe9\"}"),
    )
        .into_response()
}

async fn fail() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn fail_binary() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Bytes::from_static(b"upstream \xff\xfe failure"),
    )
        .into_response()
}
