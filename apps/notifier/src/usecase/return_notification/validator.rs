//! # リクエスト検証
//!
//! 冒頭のガード判定と、参照先（リセラー、クライアント、作成者、エキスパート）の解決を行う。
//!
//! 判定順序は固定で、最初に失敗した検査の結果を返す。
//!
//! 1. `resellerId` ガード（ソフトな拒否）
//! 2. `notificationType` ガード
//! 3. リセラー（`creator` の ID で解決する）
//! 4. クライアント（顧客種別かつリクエストのリセラーに所属していること）
//! 5. 作成者（`creator` の ID で解決する）
//! 6. エキスパート

use std::sync::Arc;

use returnflow_domain::{
    contractor::{ClientContext, EmployeeContext, ResellerContext, ResellerId},
    request::ReturnNotificationRequest,
};
use returnflow_infra::repository::{ContractorRepository, ResellerRepository};

use crate::{config::GuardMode, error::ReturnNotificationError};

/// `resellerId` ガード作動時に SMS メッセージ欄へ載せる文言
pub const EMPTY_RESELLER_ID: &str = "Empty resellerId";

/// 解決済みの当事者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParties {
    pub reseller:         ResellerContext,
    pub client:           ClientContext,
    /// クライアントの表示名（フルネーム、なければ名前）
    pub client_full_name: String,
    pub creator:          EmployeeContext,
    pub expert:           EmployeeContext,
}

/// 検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// すべての検査を通過した
    Valid(Box<ResolvedParties>),
    /// 処理を打ち切るが、エラーにはしない
    SoftFailure(&'static str),
}

/// リクエストバリデーター
pub struct RequestValidator {
    resellers:   Arc<dyn ResellerRepository>,
    contractors: Arc<dyn ContractorRepository>,
    guard_mode:  GuardMode,
}

impl RequestValidator {
    pub fn new(
        resellers: Arc<dyn ResellerRepository>,
        contractors: Arc<dyn ContractorRepository>,
        guard_mode: GuardMode,
    ) -> Self {
        Self {
            resellers,
            contractors,
            guard_mode,
        }
    }

    /// リクエストを検証し、当事者を解決する
    ///
    /// リポジトリのエラーはそのまま致命的エラーとして返す。
    pub async fn validate(
        &self,
        request: &ReturnNotificationRequest,
    ) -> Result<ValidationOutcome, ReturnNotificationError> {
        if self.guard_mode.rejects_reseller(request.reseller_id) {
            return Ok(ValidationOutcome::SoftFailure(EMPTY_RESELLER_ID));
        }

        if self
            .guard_mode
            .rejects_notification_type(request.notification_type)
        {
            return Err(rejected("Empty notificationType"));
        }

        let reseller = self
            .resellers
            .find_by_id(ResellerId::new(request.creator.as_i64()))
            .await?
            .ok_or_else(|| rejected("Seller not found!"))?;

        let client = self
            .contractors
            .find_client(request.client_id)
            .await?
            .filter(|client| client.is_customer() && client.belongs_to(request.reseller_id))
            .ok_or_else(|| rejected("Client not found!"))?;

        let client_full_name = client.display_name().to_string();

        let creator = self
            .contractors
            .find_employee(request.creator)
            .await?
            .ok_or_else(|| rejected("Creator not found!"))?;

        let expert = self
            .contractors
            .find_employee(request.expert_id)
            .await?
            .ok_or_else(|| rejected("Expert not found!"))?;

        Ok(ValidationOutcome::Valid(Box::new(ResolvedParties {
            reseller,
            client,
            client_full_name,
            creator,
            expert,
        })))
    }
}

fn rejected(message: &str) -> ReturnNotificationError {
    ReturnNotificationError::Validation(message.to_string())
}
