//! # TaskHub ドメイン層
//!
//! タスク管理のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **I/O 非依存**: このクレートはデータベースや HTTP に依存しない。
//!   エンティティの構築とパッチ適用のロジックのみを持つ
//! - **明示的なパッチ**: 部分更新は [`task::TaskPatch`] で「フィールドを
//!   省略した」と「フィールドをクリアしたい」を型で区別する
//!
//! ## 依存関係
//!
//! ```text
//! task-service → infra → domain
//!          ↘______________↗
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。

pub mod task;

pub use task::{NewTask, Task, TaskId, TaskPatch};
