use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use taskhub_infra::mock::MockTaskRepository;
use tower::ServiceExt;

use super::*;

// テスト用ヘルパー

fn test_app() -> Router {
    let state = Arc::new(TaskState {
        repository: MockTaskRepository::new(),
    });
    router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn parse_timestamp(value: &Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

async fn create_task_with(app: &Router, body: Value) -> Value {
    let response = send(app, Method::POST, "/tasks", Some(body.to_string())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ===== POST /tasks =====

#[tokio::test]
async fn test_createは201と採番済みタスクを返す() {
    let app = test_app();

    let created = create_task_with(
        &app,
        json!({
            "title": "最初のタスク",
            "description": "説明文",
            "due_date": "2026-09-01T00:00:00Z"
        }),
    )
    .await;

    assert_eq!(created["id"], json!(1));
    assert_eq!(created["title"], "最初のタスク");
    assert_eq!(created["description"], "説明文");
    assert_eq!(
        parse_timestamp(&created["due_date"]),
        "2026-09-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
    // 作成直後は created_at == updated_at
    assert_eq!(
        parse_timestamp(&created["created_at"]),
        parse_timestamp(&created["updated_at"])
    );
}

#[tokio::test]
async fn test_createは空のjsonオブジェクトも受け付ける() {
    let app = test_app();

    let created = create_task_with(&app, json!({})).await;

    assert_eq!(created["id"], json!(1));
    assert_eq!(created["title"], "");
    assert_eq!(created["description"], "");
    assert_eq!(created["due_date"], Value::Null);
}

#[tokio::test]
async fn test_createはクライアント指定のidとタイムスタンプを無視する() {
    let app = test_app();

    let created = create_task_with(
        &app,
        json!({
            "id": 999,
            "title": "採番はサーバー側",
            "created_at": "2000-01-01T00:00:00Z",
            "updated_at": "2000-01-01T00:00:00Z"
        }),
    )
    .await;

    assert_eq!(created["id"], json!(1));
    assert!(parse_timestamp(&created["created_at"]).timestamp() > 946_684_800);
}

#[tokio::test]
async fn test_不正なjsonのcreateは400でデータを変更しない() {
    let app = test_app();

    let response = send(
        &app,
        Method::POST,
        "/tasks",
        Some("{not valid json".to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_bytes(response).await.is_empty());

    let list = send(&app, Method::GET, "/tasks", None).await;
    assert_eq!(body_json(list).await, json!([]));
}

// ===== GET /tasks/{id} =====

#[tokio::test]
async fn test_作成直後のタスクはidで取得でき内容が一致する() {
    let app = test_app();
    let created = create_task_with(&app, json!({ "title": "照合用" })).await;

    let response = send(&app, Method::GET, "/tasks/1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn test_存在しないidの取得は404でボディなし() {
    let app = test_app();

    let response = send(&app, Method::GET, "/tasks/999", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_整数でないidは404になる() {
    let app = test_app();

    let response = send(&app, Method::GET, "/tasks/abc", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ===== GET /tasks =====

#[tokio::test]
async fn test_一覧は挿入順で全タスクを返す() {
    let app = test_app();
    create_task_with(&app, json!({ "title": "一件目" })).await;
    create_task_with(&app, json!({ "title": "二件目" })).await;

    let response = send(&app, Method::GET, "/tasks", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list[0]["title"], "一件目");
    assert_eq!(list[1]["title"], "二件目");
    assert_eq!(list.as_array().unwrap().len(), 2);
}

// ===== PUT /tasks/{id} =====

#[tokio::test]
async fn test_updateはタイトルのみ上書きし他フィールドを保持する() {
    let app = test_app();
    let created = create_task_with(
        &app,
        json!({
            "title": "元のタイトル",
            "description": "元の説明",
            "due_date": "2026-10-01T00:00:00Z"
        }),
    )
    .await;

    let response = send(
        &app,
        Method::PUT,
        "/tasks/1",
        Some(json!({ "title": "new title" }).to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "new title");
    assert_eq!(updated["description"], "元の説明");
    assert_eq!(
        parse_timestamp(&updated["due_date"]),
        parse_timestamp(&created["due_date"])
    );
    // updated_at は前回値より厳密に増加する
    assert!(parse_timestamp(&updated["updated_at"]) > parse_timestamp(&created["updated_at"]));
    assert_eq!(
        parse_timestamp(&updated["created_at"]),
        parse_timestamp(&created["created_at"])
    );
}

#[tokio::test]
async fn test_updateでdue_dateを明示的にnullでクリアできる() {
    let app = test_app();
    create_task_with(&app, json!({ "title": "t", "due_date": "2026-10-01T00:00:00Z" })).await;

    let response = send(
        &app,
        Method::PUT,
        "/tasks/1",
        Some(json!({ "due_date": null }).to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["due_date"], Value::Null);
}

#[tokio::test]
async fn test_updateで省略したdue_dateは変更されない() {
    let app = test_app();
    let created =
        create_task_with(&app, json!({ "title": "t", "due_date": "2026-10-01T00:00:00Z" })).await;

    let response = send(
        &app,
        Method::PUT,
        "/tasks/1",
        Some(json!({ "description": "説明のみ更新" }).to_string()),
    )
    .await;

    let updated = body_json(response).await;
    assert_eq!(
        parse_timestamp(&updated["due_date"]),
        parse_timestamp(&created["due_date"])
    );
    assert_eq!(updated["description"], "説明のみ更新");
}

#[tokio::test]
async fn test_存在しないidのupdateは404() {
    let app = test_app();

    let response = send(
        &app,
        Method::PUT,
        "/tasks/42",
        Some(json!({ "title": "x" }).to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_不正なjsonのupdateは400でデータを変更しない() {
    let app = test_app();
    create_task_with(&app, json!({ "title": "変更前" })).await;

    let response = send(
        &app,
        Method::PUT,
        "/tasks/1",
        Some("{broken".to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = send(&app, Method::GET, "/tasks/1", None).await;
    assert_eq!(body_json(stored).await["title"], "変更前");
}

// ===== DELETE /tasks/{id} =====

#[tokio::test]
async fn test_deleteは204を返しその後の取得は404になる() {
    let app = test_app();
    create_task_with(&app, json!({ "title": "削除対象" })).await;

    let response = send(&app, Method::DELETE, "/tasks/1", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let fetch = send(&app, Method::GET, "/tasks/1", None).await;
    assert_eq!(fetch.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_存在しないidのdeleteは404() {
    let app = test_app();

    let response = send(&app, Method::DELETE, "/tasks/9", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_n件作成し1件削除した一覧はn引く1件になる() {
    let app = test_app();
    for i in 1..=3 {
        create_task_with(&app, json!({ "title": format!("タスク{i}") })).await;
    }

    let delete = send(&app, Method::DELETE, "/tasks/2", None).await;
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    let list = body_json(send(&app, Method::GET, "/tasks", None).await).await;
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}
