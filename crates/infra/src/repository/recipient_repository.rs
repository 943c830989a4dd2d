//! # RecipientRepository
//!
//! メール送信元アドレスと、権限（permit）ごとの通知先従業員アドレスを参照する。
//!
//! - 送信元: `sellers.email_from`（未設定なら空文字列）
//! - 通知先: `employee_permits`（リセラー × 権限タグ）。アドレス順で返す

use async_trait::async_trait;
use returnflow_domain::contractor::ResellerId;
use sqlx::PgPool;

use crate::error::InfraError;

/// 通知先リポジトリトレイト
#[async_trait]
pub trait RecipientRepository: Send + Sync {
    /// リセラーの送信元メールアドレスを取得する（未設定なら空文字列）
    async fn find_from_address(&self, reseller_id: ResellerId) -> Result<String, InfraError>;

    /// 権限タグを持つ従業員のメールアドレス一覧を取得する
    async fn find_emails_by_permit(
        &self,
        reseller_id: ResellerId,
        permit: &str,
    ) -> Result<Vec<String>, InfraError>;
}

/// PostgreSQL 実装の RecipientRepository
#[derive(Debug, Clone)]
pub struct PostgresRecipientRepository {
    pool: PgPool,
}

impl PostgresRecipientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipientRepository for PostgresRecipientRepository {
    async fn find_from_address(&self, reseller_id: ResellerId) -> Result<String, InfraError> {
        let email_from = sqlx::query_scalar::<_, Option<String>>(
            "SELECT email_from FROM sellers WHERE id = $1",
        )
        .bind(reseller_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(email_from.flatten().unwrap_or_default())
    }

    async fn find_emails_by_permit(
        &self,
        reseller_id: ResellerId,
        permit: &str,
    ) -> Result<Vec<String>, InfraError> {
        let emails = sqlx::query_scalar::<_, String>(
            r#"
            SELECT email
            FROM employee_permits
            WHERE seller_id = $1 AND permit = $2
            ORDER BY email
            "#,
        )
        .bind(reseller_id.as_i64())
        .bind(permit)
        .fetch_all(&self.pool)
        .await?;

        Ok(emails)
    }
}
