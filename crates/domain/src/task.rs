//! # タスク
//!
//! TaskHub で管理する唯一のエンティティ。タイトル・説明・期限と
//! サーバー管理のタイムスタンプを持つ ToDo アイテムを表現する。
//!
//! ## ライフサイクル
//!
//! 1. 作成: [`NewTask`] を受け取ったリポジトリが INSERT し、DB が採番した
//!    ID とともに [`Task`] を復元する
//! 2. 更新: [`Task::apply_patch`] で指定フィールドのみ上書きし、
//!    `updated_at` を更新する
//! 3. 削除: 物理削除（論理削除なし）。ID は再利用されない
//!
//! ## 使用例
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use taskhub_domain::task::{Task, TaskId, TaskPatch};
//!
//! let now = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
//! let mut task = Task::from_db(
//!     TaskId::from_i64(1),
//!     "買い物".to_string(),
//!     String::new(),
//!     None,
//!     now,
//!     now,
//! );
//!
//! let later = now + chrono::Duration::minutes(5);
//! task.apply_patch(
//!     TaskPatch {
//!         title: Some("週末の買い物".to_string()),
//!         ..TaskPatch::default()
//!     },
//!     later,
//! );
//!
//! assert_eq!(task.title(), "週末の買い物");
//! assert_eq!(task.updated_at(), later);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =========================================================================
// TaskId（タスク識別子）
// =========================================================================

/// タスクの一意識別子
///
/// データベースの `BIGSERIAL` が採番する正の整数。一度割り当てられた
/// ID は不変で、削除後も再利用されない。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{_0}")]
pub struct TaskId(i64);

impl TaskId {
    /// 既存の整数値から ID を作成する
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// 内部の整数値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

// =========================================================================
// Task（タスクエンティティ）
// =========================================================================

/// タスクエンティティ
///
/// # 不変条件
///
/// - `id` は一意で、割り当て後は変更されない
/// - `created_at <= updated_at` が常に成り立つ
/// - `created_at` は作成時に一度だけ設定され、以降変更されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id:          TaskId,
    title:       String,
    description: String,
    due_date:    Option<DateTime<Utc>>,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl Task {
    /// データベースの行からタスクを復元する
    ///
    /// ID の採番とタイムスタンプの整合性は呼び出し側（リポジトリ）が
    /// 保証する。ドメイン層ではバリデーションを行わない。
    pub fn from_db(
        id: TaskId,
        title: String,
        description: String,
        due_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_date,
            created_at,
            updated_at,
        }
    }

    /// パッチを適用し、`updated_at` を更新する
    ///
    /// `None` のフィールドは変更しない。`due_date` は二重 Option で
    /// 「省略（変更しない）」と「明示的な null（クリア）」を区別する。
    /// フィールドの指定が一つもなくても `updated_at` は更新される。
    pub fn apply_patch(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.updated_at = now;
    }

    /// タスク ID を取得する
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// タイトルを取得する
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 説明を取得する
    pub fn description(&self) -> &str {
        &self.description
    }

    /// 期限を取得する
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// 作成日時を取得する
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 更新日時を取得する
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// =========================================================================
// NewTask（作成入力）
// =========================================================================

/// タスク作成の入力
///
/// ID とタイムスタンプはサーバー側で割り当てるため含まない。
/// クライアントがリクエストに含めても無視される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// タイトル（制約なし、空文字列も許容）
    pub title:       String,
    /// 説明（省略時は空文字列）
    pub description: String,
    /// 期限（任意）
    pub due_date:    Option<DateTime<Utc>>,
}

// =========================================================================
// TaskPatch（部分更新）
// =========================================================================

/// タスクの部分更新パッチ
///
/// 「ゼロ値以外のフィールドのみ更新」という暗黙の部分更新は、
/// フィールドをクリアしたいのか省略しただけなのかを区別できない。
/// フィールドごとの Option でこの二つを型レベルで区別する。
///
/// - `title` / `description`: `None` なら変更しない。空文字列への
///   上書きは `Some(String::new())` で表現できる
/// - `due_date`: 外側の `None` は「変更しない」、`Some(None)` は
///   「null にクリア」、`Some(Some(t))` は「t に上書き」
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// タイトルの上書き値
    pub title:       Option<String>,
    /// 説明の上書き値
    pub description: Option<String>,
    /// 期限の上書き値（二重 Option）
    pub due_date:    Option<Option<DateTime<Utc>>>,
}
