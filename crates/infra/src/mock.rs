//! # テスト用モックリポジトリ
//!
//! ハンドラテストで使用するインメモリの [`TaskRepository`] 実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! taskhub-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! ID は単調増加のカウンタで採番し、削除後も再利用しない
//! （`BIGSERIAL` と同じ性質）。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskhub_domain::task::{NewTask, Task, TaskId};

use crate::{error::InfraError, repository::TaskRepository};

#[derive(Default)]
struct MockState {
    tasks:   Vec<Task>,
    next_id: i64,
}

/// インメモリ実装の TaskRepository
#[derive(Clone, Default)]
pub struct MockTaskRepository {
    state: Arc<Mutex<MockState>>,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保持しているタスク数を返す（テストのアサーション用）
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn insert(&self, new_task: &NewTask, now: DateTime<Utc>) -> Result<Task, InfraError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let task = Task::from_db(
            TaskId::from_i64(state.next_id),
            new_task.title.clone(),
            new_task.description.clone(),
            new_task.due_date,
            now,
            now,
        );
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_all(&self) -> Result<Vec<Task>, InfraError> {
        Ok(self.state.lock().unwrap().tasks.clone())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, InfraError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .tasks
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn update(&self, task: &Task) -> Result<(), InfraError> {
        let mut state = self.state.lock().unwrap();
        let Some(stored) = state.tasks.iter_mut().find(|t| t.id() == task.id()) else {
            return Err(InfraError::unexpected(format!(
                "存在しないタスクの更新: {}",
                task.id()
            )));
        };
        *stored = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<bool, InfraError> {
        let mut state = self.state.lock().unwrap();
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id() != id);
        Ok(state.tasks.len() < before)
    }
}
