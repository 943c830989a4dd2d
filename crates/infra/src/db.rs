//! # PostgreSQL データベース接続管理
//!
//! 参照系リポジトリ（リセラー、取引先、通知先）が使う接続プールの作成と
//! マイグレーションを行う。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use returnflow_infra::db;
//!
//! let pool = db::create_pool("postgres://localhost/returnflow").await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::error::InfraError;

/// データベースマイグレーションを実行する
///
/// `sqlx::migrate!()` マクロで埋め込まれたマイグレーションファイルを
/// 順番に適用する。適用済みのマイグレーションはスキップされる。
pub async fn run_migrations(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// PostgreSQL 接続プールを作成する
///
/// 1 リクエストを処理して終了するプロセスのため、接続数は小さく保つ。
///
/// - `max_connections(4)`: 1 リクエストで同時に走るクエリは高々 3 本
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時はエラー
pub async fn create_pool(database_url: &str) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}
