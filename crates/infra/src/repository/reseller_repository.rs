//! # ResellerRepository
//!
//! リセラー（`sellers` テーブル）の参照を担当するリポジトリ。

use async_trait::async_trait;
use returnflow_domain::contractor::{ResellerContext, ResellerId};
use sqlx::PgPool;

use crate::error::InfraError;

/// リセラーリポジトリトレイト
#[async_trait]
pub trait ResellerRepository: Send + Sync {
    /// ID でリセラーを検索
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(reseller))`: 見つかった場合
    /// - `Ok(None)`: 見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_id(&self, id: ResellerId) -> Result<Option<ResellerContext>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct SellerRow {
    id:   i64,
    name: String,
}

/// PostgreSQL 実装の ResellerRepository
#[derive(Debug, Clone)]
pub struct PostgresResellerRepository {
    pool: PgPool,
}

impl PostgresResellerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResellerRepository for PostgresResellerRepository {
    async fn find_by_id(&self, id: ResellerId) -> Result<Option<ResellerContext>, InfraError> {
        let row = sqlx::query_as::<_, SellerRow>("SELECT id, name FROM sellers WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| ResellerContext {
            id:   ResellerId::new(row.id),
            name: row.name,
        }))
    }
}
