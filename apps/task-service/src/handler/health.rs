//! # ヘルスチェックハンドラ
//!
//! Task Service の稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! - `GET /health` - プロセスの生存確認（依存サービスは確認しない）
//! - `GET /readiness` - データベース接続を含む受け入れ可否の確認

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use taskhub_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// Readiness チェックの共有状態
pub struct ReadinessState {
    /// 疎通確認に使用するデータベース接続プール
    pub pool: PgPool,
}

/// ヘルスチェックエンドポイント
///
/// サーバーが正常に稼働していることを確認するためのエンドポイント。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness チェックエンドポイント
///
/// データベースへの疎通を `SELECT 1` で確認する。
/// 失敗時は 503 を返し、ロードバランサーからの切り離しを促す。
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();

    let mut checks = HashMap::new();
    checks.insert(
        "database".to_string(),
        if database_ok {
            CheckStatus::Ok
        } else {
            CheckStatus::Error
        },
    );

    let (code, status) = if database_ok {
        (StatusCode::OK, ReadinessStatus::Ready)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, ReadinessStatus::NotReady)
    };

    (code, Json(ReadinessResponse { status, checks }))
}
