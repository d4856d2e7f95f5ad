//! # ヘルスチェック共通型
//!
//! ヘルスチェック・Readiness エンドポイントのレスポンス型を提供する。
//! ロードバランサーやコンテナオーケストレーターの liveness/readiness
//! probe から参照される。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// プロセスが稼働していることのみを示す（依存サービスは確認しない）。
/// `version` は Cargo.toml のバージョンを返す。
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` 固定。レスポンスが返ること自体が生存の証明）
    pub status:  String,
    /// アプリケーションバージョン
    pub version: String,
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// チェック成功
    Ok,
    /// チェック失敗
    Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    /// 全依存サービスが利用可能
    Ready,
    /// 一部の依存サービスが利用不可
    NotReady,
}

/// Readiness Check レスポンス
///
/// 依存サービス（データベースなど）への接続状態を個別チェック結果として
/// 含む。いずれかのチェックが失敗した場合、全体ステータスは
/// [`ReadinessStatus::NotReady`] になる。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// 全体のステータス
    pub status: ReadinessStatus,
    /// 個別チェック結果（キー: チェック名、値: ステータス）
    pub checks: HashMap<String, CheckStatus>,
}
