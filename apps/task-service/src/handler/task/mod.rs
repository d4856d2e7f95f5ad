//! # タスク API ハンドラ
//!
//! タスクの CRUD エンドポイントを実装する。
//!
//! ## エンドポイント
//!
//! - `POST /tasks` - タスクを作成
//! - `GET /tasks` - 全タスクを一覧
//! - `GET /tasks/{id}` - ID でタスクを取得
//! - `PUT /tasks/{id}` - タスクを部分更新
//! - `DELETE /tasks/{id}` - タスクを削除
//!
//! ## エラーマッピング
//!
//! - JSON ボディのデコード失敗 → 400（ボディなし）
//! - 該当 ID の行がない、または ID が整数にパースできない → 404（ボディなし）

use std::sync::Arc;

use axum::{
    Json,
    Router,
    extract::{
        Path,
        State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use taskhub_domain::task::{NewTask, Task, TaskId, TaskPatch};
use taskhub_infra::repository::TaskRepository;

use crate::error::ApiError;

/// タスクハンドラーの共有状態
pub struct TaskState<R> {
    pub repository: R,
}

// --- リクエスト/レスポンス型 ---

/// タスクレスポンス DTO
///
/// タイムスタンプは RFC 3339 文字列で返す。
#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub id:          i64,
    pub title:       String,
    pub description: String,
    pub due_date:    Option<String>,
    pub created_at:  String,
    pub updated_at:  String,
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id:          task.id().as_i64(),
            title:       task.title().to_string(),
            description: task.description().to_string(),
            due_date:    task.due_date().map(|t| t.to_rfc3339()),
            created_at:  task.created_at().to_rfc3339(),
            updated_at:  task.updated_at().to_rfc3339(),
        }
    }
}

/// タスク作成リクエスト
///
/// すべてのフィールドが省略可能（省略時は空文字列 / null で作成する）。
/// `id` / `created_at` / `updated_at` が含まれていても未知フィールドとして
/// 無視される。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    pub title:       String,
    pub description: String,
    pub due_date:    Option<DateTime<Utc>>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        Self {
            title:       req.title,
            description: req.description,
            due_date:    req.due_date,
        }
    }
}

/// タスク更新リクエスト（部分更新）
///
/// フィールドごとの Option で「省略（変更しない）」を表現する。
/// `due_date` のみ二重 Option で「明示的な null（クリア）」も区別する。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    pub title:       Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub due_date:    Option<Option<DateTime<Utc>>>,
}

/// フィールドが存在した場合のみ外側の `Some` に包むデシリアライザ
///
/// `#[serde(default)]` と組み合わせることで、フィールド省略は `None`、
/// 明示的な `null` は `Some(None)` になる。
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl From<UpdateTaskRequest> for TaskPatch {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title:       req.title,
            description: req.description,
            due_date:    req.due_date,
        }
    }
}

// --- ルーター ---

/// タスク API のルーターを構築する
///
/// `main` と ハンドラテストの両方から使用される。
pub fn router<R: TaskRepository + 'static>(state: Arc<TaskState<R>>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks::<R>).post(create_task::<R>))
        .route(
            "/tasks/{id}",
            get(get_task::<R>)
                .put(update_task::<R>)
                .delete(delete_task::<R>),
        )
        .with_state(state)
}

// --- ハンドラ ---

/// タスクを作成する
///
/// ## エンドポイント
/// POST /tasks → 201 + 作成されたタスク
pub async fn create_task<R: TaskRepository>(
    State(state): State<Arc<TaskState<R>>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let task = state
        .repository
        .insert(&request.into(), Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(TaskDto::from(&task))).into_response())
}

/// 全タスクを一覧する
///
/// ## エンドポイント
/// GET /tasks → 200 + タスクの配列（挿入順）
pub async fn list_tasks<R: TaskRepository>(
    State(state): State<Arc<TaskState<R>>>,
) -> Result<Response, ApiError> {
    let tasks = state.repository.find_all().await?;
    let response: Vec<TaskDto> = tasks.iter().map(TaskDto::from).collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// ID でタスクを取得する
///
/// ## エンドポイント
/// GET /tasks/{id} → 200 + タスク | 404
pub async fn get_task<R: TaskRepository>(
    State(state): State<Arc<TaskState<R>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let id = parse_task_id(id)?;

    let task = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, Json(TaskDto::from(&task))).into_response())
}

/// タスクを部分更新する
///
/// 取得 → パッチ適用 → 全フィールド書き込みの順で処理する。
/// 指定されなかったフィールドは変更されず、`updated_at` は常に更新される。
///
/// ## エンドポイント
/// PUT /tasks/{id} → 200 + 更新後のタスク | 400 | 404
pub async fn update_task<R: TaskRepository>(
    State(state): State<Arc<TaskState<R>>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_task_id(id)?;
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let mut task = state
        .repository
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    task.apply_patch(request.into(), Utc::now());
    state.repository.update(&task).await?;

    Ok((StatusCode::OK, Json(TaskDto::from(&task))).into_response())
}

/// タスクを削除する
///
/// ## エンドポイント
/// DELETE /tasks/{id} → 204（ボディなし） | 404
pub async fn delete_task<R: TaskRepository>(
    State(state): State<Arc<TaskState<R>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let id = parse_task_id(id)?;

    if !state.repository.delete(id).await? {
        return Err(ApiError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// パスパラメータをタスク ID に変換する
///
/// 整数にパースできない ID は「存在しないリソース」として 404 扱いにする。
fn parse_task_id(id: Result<Path<i64>, PathRejection>) -> Result<TaskId, ApiError> {
    id.map(|Path(raw)| TaskId::from_i64(raw))
        .map_err(|_| ApiError::NotFound)
}

#[cfg(test)]
mod tests;
