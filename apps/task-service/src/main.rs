//! # Task Service サーバー
//!
//! タスク（ToDo アイテム）の CRUD API を提供する HTTP サービス。
//!
//! ## 役割
//!
//! - **タスク管理**: 作成・一覧・取得・部分更新・削除の 5 エンドポイント
//! - **データ永続化**: PostgreSQL へのエンティティ保存
//! - **スキーマ管理**: 起動時にバージョン付きマイグレーションを適用
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SERVICE_HOST` | No | バインドアドレス（デフォルト: `127.0.0.1`） |
//! | `SERVICE_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DB_HOST` | **Yes** | データベースホスト |
//! | `DB_PORT` | **Yes** | データベースポート |
//! | `POSTGRES_USER` | **Yes** | データベースユーザー |
//! | `POSTGRES_PASSWORD` | **Yes** | データベースパスワード |
//! | `POSTGRES_DB` | **Yes** | データベース名 |
//! | `LOG_FORMAT` | No | ログ出力形式（`json` / `pretty`） |
//!
//! 必須の変数が欠けている場合、データベースに接続できない場合、
//! マイグレーションに失敗した場合は、ログを出力してプロセスを終了する
//! （リトライなし、部分的な起動状態なし）。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env から環境変数を読み込む）
//! cargo run -p taskhub-task-service
//! ```

mod config;
mod error;
mod handler;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use config::ServiceConfig;
use handler::{ReadinessState, health_check, readiness_check, task::TaskState};
use taskhub_infra::{db, repository::PostgresTaskRepository};
use taskhub_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Task Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(&TracingConfig::from_env("task-service"));

    // 設定読み込み
    let config = ServiceConfig::from_env();

    tracing::info!(
        "Task Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // スキーママイグレーションを適用
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの適用に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let task_state = Arc::new(TaskState {
        repository: PostgresTaskRepository::new(pool.clone()),
    });
    let readiness_state = Arc::new(ReadinessState { pool });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/readiness", get(readiness_check))
        .with_state(readiness_state)
        .merge(handler::task::router(task_state))
        .layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Task Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
