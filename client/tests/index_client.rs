use axum::{
    extract::{Multipart, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rag_client::{ClientConfig, IndexApi, IndexClient, SelectedFile};
use serde_json::{json, Value};
use std::collections::HashMap;

async fn spawn_index(router: Router) -> IndexClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = ClientConfig::new(&format!("http://{}", addr)).unwrap();
    IndexClient::new(config)
}

async fn echo_query(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    match params.get("text") {
        Some(text) => (StatusCode::OK, Json(json!({ "answer": format!("echo: {}", text) }))),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Query text is missing" })),
        ),
    }
}

async fn receive_upload(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.unwrap();
        return (
            StatusCode::OK,
            Json(json!({
                "message": "File uploaded and inserted into index!",
                "filename": filename,
                "content": String::from_utf8_lossy(&data),
            })),
        );
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "No file provided" })),
    )
}

fn index_router() -> Router {
    Router::new()
        .route("/", get(|| async { "Hello World!" }))
        .route("/query", get(echo_query))
        .route("/uploadFile", post(receive_upload))
}

#[tokio::test]
async fn query_text_travels_as_parameter() {
    let client = spawn_index(index_router()).await;

    let response = client.submit_query("what is a transformer?").await.unwrap();
    assert_eq!(response.answer, "echo: what is a transformer?");
}

#[tokio::test]
async fn upload_sends_file_field_with_name() {
    let client = spawn_index(index_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello index").unwrap();

    let ack = client
        .upload_document(&SelectedFile::new(&path))
        .await
        .unwrap();

    assert_eq!(ack["filename"], "notes.txt");
    assert_eq!(ack["content"], "hello index");
    assert_eq!(ack["message"], "File uploaded and inserted into index!");
}

#[tokio::test]
async fn ping_returns_greeting() {
    let client = spawn_index(index_router()).await;
    assert_eq!(client.ping().await.unwrap(), "Hello World!");
}

#[tokio::test]
async fn server_error_detail_is_carried_in_error() {
    let router = Router::new().route(
        "/query",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "index not initialized" })),
            )
        }),
    );
    let client = spawn_index(router).await;

    let err = client.submit_query("anything").await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("500"), "{}", message);
    assert!(message.contains("index not initialized"), "{}", message);
}

#[tokio::test]
async fn response_without_answer_is_an_error() {
    let router = Router::new().route("/query", get(|| async { Json(json!({ "result": "x" })) }));
    let client = spawn_index(router).await;

    assert!(client.submit_query("anything").await.is_err());
}

#[tokio::test]
async fn upload_error_status_still_returns_body() {
    let router = Router::new().route(
        "/uploadFile",
        post(|mut multipart: Multipart| async move {
            while let Ok(Some(field)) = multipart.next_field().await {
                let _ = field.bytes().await;
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "index down" })),
            )
        }),
    );
    let client = spawn_index(router).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello index").unwrap();

    let ack = client
        .upload_document(&SelectedFile::new(&path))
        .await
        .unwrap();
    assert_eq!(ack["error"], "index down");
}

#[tokio::test]
async fn upload_reply_that_is_not_json_fails() {
    let router = Router::new().route(
        "/uploadFile",
        post(|mut multipart: Multipart| async move {
            while let Ok(Some(field)) = multipart.next_field().await {
                let _ = field.bytes().await;
            }
            "<html>oops</html>"
        }),
    );
    let client = spawn_index(router).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello index").unwrap();

    assert!(client.upload_document(&SelectedFile::new(&path)).await.is_err());
}

#[tokio::test]
async fn unreadable_file_fails_upload() {
    let client = spawn_index(index_router()).await;
    let dir = tempfile::tempdir().unwrap();

    let missing = SelectedFile::new(dir.path().join("gone.pdf"));
    assert!(client.upload_document(&missing).await.is_err());
}

#[tokio::test]
async fn unreachable_service_is_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = IndexClient::new(ClientConfig::new(&format!("http://{}", addr)).unwrap());
    assert!(client.submit_query("hello").await.is_err());
    assert!(client.ping().await.is_err());
}
