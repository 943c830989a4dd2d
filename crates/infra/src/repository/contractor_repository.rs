//! # ContractorRepository
//!
//! 取引先（`contractors` テーブル）の参照を担当するリポジトリ。
//!
//! クライアントと従業員は同じテーブルに `type` 列で区別して格納されている。
//!
//! - `find_client`: 種別を問わず取得する（顧客種別かどうかはユースケースが検証する）
//! - `find_employee`: `type = EMPLOYEE` の行のみを取得する

use async_trait::async_trait;
use returnflow_domain::contractor::{
    ClientContext,
    ContractorId,
    ContractorType,
    EmployeeContext,
    ResellerId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 取引先リポジトリトレイト
#[async_trait]
pub trait ContractorRepository: Send + Sync {
    /// ID でクライアント候補の取引先を検索
    async fn find_client(&self, id: ContractorId) -> Result<Option<ClientContext>, InfraError>;

    /// ID で従業員を検索
    async fn find_employee(&self, id: ContractorId)
    -> Result<Option<EmployeeContext>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct ContractorRow {
    id:              i64,
    #[sqlx(rename = "type")]
    contractor_type: i32,
    seller_id:       Option<i64>,
    name:            String,
    full_name:       Option<String>,
    email:           Option<String>,
    mobile:          Option<String>,
}

impl TryFrom<ContractorRow> for ClientContext {
    type Error = InfraError;

    fn try_from(row: ContractorRow) -> Result<Self, Self::Error> {
        let contractor_type = ContractorType::from_repr(row.contractor_type).ok_or_else(|| {
            InfraError::unexpected(format!("不明な取引先種別: {}", row.contractor_type))
        })?;

        Ok(Self {
            id: ContractorId::new(row.id),
            contractor_type,
            reseller_id: row.seller_id.map(ResellerId::new),
            email: row.email.unwrap_or_default(),
            mobile: row.mobile.unwrap_or_default(),
            name: row.name,
            full_name: row.full_name.unwrap_or_default(),
        })
    }
}

/// PostgreSQL 実装の ContractorRepository
#[derive(Debug, Clone)]
pub struct PostgresContractorRepository {
    pool: PgPool,
}

impl PostgresContractorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractorRepository for PostgresContractorRepository {
    async fn find_client(&self, id: ContractorId) -> Result<Option<ClientContext>, InfraError> {
        let row = sqlx::query_as::<_, ContractorRow>(
            r#"
            SELECT id, type, seller_id, name, full_name, email, mobile
            FROM contractors
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ClientContext::try_from).transpose()
    }

    async fn find_employee(
        &self,
        id: ContractorId,
    ) -> Result<Option<EmployeeContext>, InfraError> {
        let row = sqlx::query_as::<_, (i64, Option<String>, String)>(
            r#"
            SELECT id, full_name, name
            FROM contractors
            WHERE id = $1 AND type = $2
            "#,
        )
        .bind(id.as_i64())
        .bind(ContractorType::Employee as i32)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, full_name, name)| EmployeeContext {
            id:        ContractorId::new(id),
            // フルネーム未登録の従業員は名前で代用する
            full_name: full_name.filter(|n| !n.is_empty()).unwrap_or(name),
        }))
    }
}
