//! # Task Service 設定
//!
//! 環境変数から Task Service サーバーの設定を読み込む。
//!
//! データベース接続パラメータは個別の環境変数（`DB_HOST` など）で受け取り、
//! 接続 URL に合成する。必須の変数が欠けている場合は起動時に即座に失敗する
//! （部分的な起動状態を作らない）。

use std::env;

/// Task Service サーバーの設定
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL（環境変数から合成）
    pub database_url: String,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    ///
    /// ## 環境変数
    ///
    /// | 変数名 | 必須 | 説明 |
    /// |--------|------|------|
    /// | `SERVICE_HOST` | No | バインドアドレス（デフォルト: `127.0.0.1`） |
    /// | `SERVICE_PORT` | No | ポート番号（デフォルト: `8080`） |
    /// | `DB_HOST` | **Yes** | データベースホスト |
    /// | `DB_PORT` | **Yes** | データベースポート |
    /// | `POSTGRES_USER` | **Yes** | データベースユーザー |
    /// | `POSTGRES_PASSWORD` | **Yes** | データベースパスワード |
    /// | `POSTGRES_DB` | **Yes** | データベース名 |
    pub fn from_env() -> Self {
        Self {
            host:         env::var("SERVICE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port:         env::var("SERVICE_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVICE_PORT は有効なポート番号である必要があります"),
            database_url: Self::database_url_from_env(),
        }
    }

    /// データベース接続 URL を個別の環境変数から合成する
    fn database_url_from_env() -> String {
        let db_host = env::var("DB_HOST").expect("DB_HOST が設定されていません");
        let db_port = env::var("DB_PORT").expect("DB_PORT が設定されていません");
        let user = env::var("POSTGRES_USER").expect("POSTGRES_USER が設定されていません");
        let password = env::var("POSTGRES_PASSWORD").expect("POSTGRES_PASSWORD が設定されていません");
        let database = env::var("POSTGRES_DB").expect("POSTGRES_DB が設定されていません");

        format!("postgres://{user}:{password}@{db_host}:{db_port}/{database}")
    }
}
