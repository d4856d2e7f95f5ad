//! # リポジトリ定義と実装
//!
//! ドメインエンティティの永続化インターフェースと、その PostgreSQL 実装を
//! 提供する。上位層はトレイト経由でリポジトリを利用し、具体実装に依存しない。

pub mod task_repository;

pub use task_repository::{PostgresTaskRepository, TaskRepository};
