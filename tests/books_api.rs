//! Drives the router in-process through the `/books` endpoints.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use the_books::{
    error::ErrorVerbosity,
    server::{app, ServerConfig},
    store::BookStore,
};

fn config(verbosity: ErrorVerbosity) -> ServerConfig {
    ServerConfig::new("127.0.0.1:0".parse().unwrap(), verbosity)
}

fn router(verbosity: ErrorVerbosity) -> Router {
    app(&config(verbosity), BookStore::new())
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let request = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

async fn json_of(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    serde_json::from_slice(&bytes).unwrap_or_else(|err| panic!("Expected a JSON body: {err}"))
}

fn dune() -> Value {
    json!({
        "title": "Dune",
        "author": "Frank Herbert",
        "publication_year": 1965,
    })
}

#[tokio::test]
async fn create_then_get() {
    let router = router(ErrorVerbosity::Full);

    let response = send(&router, Method::POST, "/books", Some(dune())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        json_of(response).await,
        json!({
            "id": 1,
            "title": "Dune",
            "author": "Frank Herbert",
            "publication_year": 1965,
            "isbn": null,
        })
    );

    let response = send(&router, Method::GET, "/books/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_of(response).await["title"], "Dune");
}

#[tokio::test]
async fn list_returns_books_in_id_order() {
    let router = router(ErrorVerbosity::Full);

    let response = send(&router, Method::GET, "/books", None).await;
    assert_eq!(json_of(response).await, json!([]));

    send(&router, Method::POST, "/books", Some(dune())).await;
    send(
        &router,
        Method::POST,
        "/books",
        Some(json!({ "title": "Emma", "author": "Jane Austen", "isbn": "978-0141439587" })),
    )
    .await;

    let books = json_of(send(&router, Method::GET, "/books", None).await).await;
    let ids = books
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["id"].as_i64().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(ids, vec![1, 2]);
    assert_eq!(books[1]["isbn"], "978-0141439587");
    assert_eq!(books[1]["publication_year"], Value::Null);
}

#[tokio::test]
async fn invalid_creation_lists_offending_fields() {
    let router = router(ErrorVerbosity::Full);

    let response = send(
        &router,
        Method::POST,
        "/books",
        Some(json!({ "title": "Dune", "publication_year": "not-a-number" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_of(response).await;
    assert_eq!(body["error_type"], "Payload");

    let mut fields = body["error"]["payload_error_fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|field| field["field"].as_str().unwrap().to_owned())
        .collect::<Vec<_>>();
    fields.sort();

    assert_eq!(fields, vec!["author", "publication_year"]);
    assert!(body["error"]["payload_expected_schema"].is_string());

    let books = json_of(send(&router, Method::GET, "/books", None).await).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn malformed_json_is_a_body_error() {
    let router = router(ErrorVerbosity::Full);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(response).await["error_type"], "Body");
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let router = router(ErrorVerbosity::Full);

    let response = send(&router, Method::POST, "/books", Some(json!(["Dune"]))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_of(response).await;
    assert_eq!(
        body["error"]["payload_error_reason"],
        "payload must be an object, found array"
    );
}

#[tokio::test]
async fn update_applies_partial_patch() {
    let router = router(ErrorVerbosity::Full);

    send(
        &router,
        Method::POST,
        "/books",
        Some(json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "publication_year": 1965,
            "isbn": "978-0441013593",
        })),
    )
    .await;

    let response = send(
        &router,
        Method::PUT,
        "/books/1",
        Some(json!({ "title": "Dune Messiah", "isbn": null })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_of(response).await,
        json!({
            "id": 1,
            "title": "Dune Messiah",
            "author": "Frank Herbert",
            "publication_year": 1965,
            "isbn": null,
        })
    );

    let response = send(&router, Method::PUT, "/books/1", Some(json!({}))).await;
    assert_eq!(json_of(response).await["title"], "Dune Messiah");
}

#[tokio::test]
async fn update_rejects_null_title() {
    let router = router(ErrorVerbosity::Full);

    send(&router, Method::POST, "/books", Some(dune())).await;

    let response = send(&router, Method::PUT, "/books/1", Some(json!({ "title": null }))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let book = json_of(send(&router, Method::GET, "/books/1", None).await).await;
    assert_eq!(book["title"], "Dune");
}

#[tokio::test]
async fn delete_then_not_found() {
    let router = router(ErrorVerbosity::Full);

    send(&router, Method::POST, "/books", Some(dune())).await;

    let response = send(&router, Method::DELETE, "/books/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&router, Method::GET, "/books/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_of(response).await,
        json!({
            "error_type": "NotFound",
            "error": { "reason": "Book with id 1 not found" },
            "message": "Book not found",
        })
    );

    let response = send(&router, Method::DELETE, "/books/1", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&router, Method::PUT, "/books/1", Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_is_a_path_error() {
    let router = router(ErrorVerbosity::Full);

    let response = send(&router, Method::GET, "/books/dune", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(response).await["error_type"], "Path");
}

#[tokio::test]
async fn unknown_routes_and_methods_are_api_errors() {
    let router = router(ErrorVerbosity::Message);

    let response = send(&router, Method::GET, "/authors", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_of(response).await,
        json!({ "message": "The requested resource was not found" })
    );

    let response = send(&router, Method::PATCH, "/books/1", Some(json!({}))).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json_of(response).await, json!({ "message": "Method not allowed" }));
}

#[tokio::test]
async fn none_verbosity_hides_errors() {
    let router = router(ErrorVerbosity::None);

    let response = send(&router, Method::GET, "/books/7", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let router = router(ErrorVerbosity::Full);

    let response = send(&router, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = json_of(response).await;
    assert!(doc["paths"]["/books"]["post"].is_object());
}

#[tokio::test]
async fn traced_responses_are_passed_through_unchanged() {
    let books = BookStore::new();
    let router = app(
        &config(ErrorVerbosity::Full).with_trace_response_body(true),
        books.clone(),
    );

    let response = send(&router, Method::POST, "/books", Some(dune())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_of(response).await["id"], 1);

    let response = send(&router, Method::GET, "/books/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(json_of(response).await["author"], "Frank Herbert");

    let response = send(&router, Method::GET, "/books/2", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_of(response).await["error_type"], "NotFound");

    assert_eq!(books.list().await.len(), 1);
}
