//! # Task Service エラー定義
//!
//! Task Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 失敗レスポンスはステータスコードのみでボディを持たない。
//! エラーの詳細はクライアントに返さず、サーバー側のログにのみ記録する。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskhub_infra::InfraError;
use thiserror::Error;

/// Task Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リソースが見つからない
    #[error("リソースが見つかりません")]
    NotFound,

    /// 不正なリクエスト（JSON デコード失敗など）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// インフラ層エラー（データベースエラーなど）
    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::BadRequest(reason) => {
                tracing::debug!(%reason, "不正なリクエストを拒否しました");
                StatusCode::BAD_REQUEST.into_response()
            }
            ApiError::Infra(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "インフラ層エラーが発生しました"
                );
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
