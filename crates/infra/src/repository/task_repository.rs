//! # TaskRepository
//!
//! タスクの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ID は DB 採番**: `BIGSERIAL` が採番した ID を `RETURNING` で受け取り、
//!   挿入結果からエンティティを復元する
//! - **同期書き込み**: すべての書き込みはレスポンス返却前に DB へ反映される
//!   （書き込みバッファリングなし）
//! - **トランザクションなし**: 各操作は単一ステートメントで完結する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskhub_domain::task::{NewTask, Task, TaskId};

use crate::error::InfraError;

/// タスクリポジトリトレイト
///
/// タスクの CRUD 操作を定義する。
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// タスクを挿入し、DB が採番した ID とともに返す
    ///
    /// `created_at` と `updated_at` はともに `now` で初期化される。
    async fn insert(&self, new_task: &NewTask, now: DateTime<Utc>) -> Result<Task, InfraError>;

    /// 全タスクを挿入順（ID 昇順）で取得する
    async fn find_all(&self) -> Result<Vec<Task>, InfraError>;

    /// ID でタスクを検索する
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, InfraError>;

    /// タスクを更新する（パッチ適用済みエンティティの全フィールド書き込み）
    async fn update(&self, task: &Task) -> Result<(), InfraError>;

    /// タスクを削除し、行が存在したかを返す
    async fn delete(&self, id: TaskId) -> Result<bool, InfraError>;
}

/// tasks テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id:          i64,
    title:       String,
    description: String,
    due_date:    Option<DateTime<Utc>>,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task::from_db(
            TaskId::from_i64(row.id),
            row.title,
            row.description,
            row.due_date,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, new_task: &NewTask, now: DateTime<Utc>) -> Result<Task, InfraError> {
        // created_at と updated_at に同じ $4 をバインドし、
        // 作成直後は created_at == updated_at を保証する
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (title, description, due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, title, description, due_date, created_at, updated_at
            "#,
        )
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(new_task.due_date)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Task>, InfraError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, due_date, created_at, updated_at
            FROM tasks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, InfraError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, due_date, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %task.id()))]
    async fn update(&self, task: &Task) -> Result<(), InfraError> {
        // created_at は書き込まない（作成時のみ設定される）
        sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, due_date = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(task.id().as_i64())
        .bind(task.title())
        .bind(task.description())
        .bind(task.due_date())
        .bind(task.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: TaskId) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresTaskRepository>();
        assert_send_sync::<Box<dyn TaskRepository>>();
    }
}
