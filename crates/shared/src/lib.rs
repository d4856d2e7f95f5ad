//! # TaskHub 共有ユーティリティ
//!
//! サービス横断で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える
//! - トレーシング初期化は `observability` feature で opt-in にする

pub mod health;
#[cfg(feature = "observability")]
pub mod observability;

pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
