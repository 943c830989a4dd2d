//! # 通知
//!
//! 返品クレーム変更に伴う通知のドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationType`] | 通知種別 | NEW（ポジション追加）/ CHANGE（ステータス変更） |
//! | [`NotificationEvent`] | 通知イベント | 送信基盤に渡すイベント種別 |
//! | [`EmailBatch`] | メール送信バッチ | 送信基盤に一括で渡すメール群と付帯情報 |
//! | [`SmsRequest`] / [`SmsOutcome`] | SMS 送信 | SMS 送信基盤の入力と結果 |
//! | [`DispatchResult`] | 送信結果 | チャネルごとの送信結果。ユースケースの唯一の出力 |
//!
//! ## チャネル
//!
//! - 従業員メール: リセラーの権限 `tsGoodsReturn` を持つ従業員宛
//! - クライアントメール: ステータス変更時のみ
//! - クライアント SMS: 携帯番号があれば通知種別を問わず
//!
//! 各チャネルの成否は独立しており、あるチャネルの失敗が他のチャネルを止めることはない。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    contractor::{ContractorId, ResellerId},
    template::TemplateData,
};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// 送信に失敗
    #[error("送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知種別
///
/// リクエストの `notificationType` に数値で入る。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::FromRepr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(i64)]
pub enum NotificationType {
    /// 新しいポジションが追加された
    New = 1,
    /// ポジションのステータスが変わった（`differences` を伴う）
    Change = 2,
}

impl NotificationType {
    /// 生コードから変換する（未知のコードは `None`）
    pub fn from_code(code: i64) -> Option<Self> {
        Self::from_repr(code)
    }
}

/// 通知イベント種別
///
/// 送信基盤（メール・SMS）に渡され、下流の集計に使われる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationEvent {
    /// 返品ステータスの変更
    ChangeReturnStatus,
}

/// メールメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元メールアドレス
    pub from:    String,
    /// 送信先メールアドレス
    pub to:      String,
    /// 件名
    pub subject: String,
    /// プレーンテキスト本文
    pub body:    String,
}

/// メール送信バッチ
///
/// クライアント宛の場合は `client_id` と `differences_to` が付与され、
/// 送信基盤側でイベントのタグとして記録される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailBatch {
    pub reseller_id:    ResellerId,
    pub event:          NotificationEvent,
    pub messages:       Vec<EmailMessage>,
    pub client_id:      Option<ContractorId>,
    pub differences_to: Option<i64>,
}

impl EmailBatch {
    /// 従業員宛のバッチを作成する
    pub fn for_employees(
        reseller_id: ResellerId,
        event: NotificationEvent,
        messages: Vec<EmailMessage>,
    ) -> Self {
        Self {
            reseller_id,
            event,
            messages,
            client_id: None,
            differences_to: None,
        }
    }

    /// クライアント宛のバッチを作成する
    pub fn for_client(
        reseller_id: ResellerId,
        event: NotificationEvent,
        message: EmailMessage,
        client_id: ContractorId,
        differences_to: i64,
    ) -> Self {
        Self {
            reseller_id,
            event,
            messages: vec![message],
            client_id: Some(client_id),
            differences_to: Some(differences_to),
        }
    }
}

/// SMS 送信リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    pub reseller_id:   ResellerId,
    pub client_id:     ContractorId,
    pub event:         NotificationEvent,
    /// 変更後ステータス（差分がない場合は 0）
    pub to_status:     i64,
    pub template_data: TemplateData,
}

/// SMS 送信結果
///
/// 送信基盤は成否とは別にエラーメッセージを返すことがある（成功時でも返り得る）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SmsOutcome {
    pub sent:  bool,
    #[serde(default)]
    pub error: String,
}

impl SmsOutcome {
    /// 送信成功
    pub fn sent() -> Self {
        Self {
            sent:  true,
            error: String::new(),
        }
    }

    /// 送信失敗
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            sent:  false,
            error: error.into(),
        }
    }
}

/// SMS チャネルの送信結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsDispatchResult {
    pub is_sent: bool,
    pub message: String,
}

impl From<SmsOutcome> for SmsDispatchResult {
    /// エラーメッセージは送信成否に関わらず空でなければ引き継ぐ
    fn from(outcome: SmsOutcome) -> Self {
        Self {
            is_sent: outcome.sent,
            message: outcome.error,
        }
    }
}

/// 送信結果
///
/// フィールド名は既存の呼び出し元との互換のため camelCase でシリアライズする。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub notification_employee_by_email: bool,
    pub notification_client_by_email:   bool,
    pub notification_client_by_sms:     SmsDispatchResult,
}

impl DispatchResult {
    /// 送信を一切行わず、SMS メッセージ欄に理由だけを載せた結果
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            notification_client_by_sms: SmsDispatchResult {
                is_sent: false,
                message: message.into(),
            },
            ..Self::default()
        }
    }

    /// チャネルごとの結果をまとめる
    pub fn from_channels(
        employee_by_email: bool,
        client_by_email: bool,
        client_by_sms: SmsDispatchResult,
    ) -> Self {
        Self {
            notification_employee_by_email: employee_by_email,
            notification_client_by_email:   client_by_email,
            notification_client_by_sms:     client_by_sms,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_notification_typeは生コードから変換できる() {
        assert_eq!(NotificationType::from_code(1), Some(NotificationType::New));
        assert_eq!(NotificationType::from_code(2), Some(NotificationType::Change));
        assert_eq!(NotificationType::from_code(0), None);
        assert_eq!(NotificationType::from_code(3), None);
    }

    #[test]
    fn test_notification_eventの文字列表現はスネークケース() {
        assert_eq!(
            NotificationEvent::ChangeReturnStatus.to_string(),
            "change_return_status"
        );
        assert_eq!(
            serde_json::to_value(NotificationEvent::ChangeReturnStatus).unwrap(),
            json!("change_return_status")
        );
    }

    #[test]
    fn test_dispatch_resultは既存のフィールド名でシリアライズされる() {
        let result = DispatchResult::from_channels(
            true,
            false,
            SmsDispatchResult {
                is_sent: true,
                message: "quota low".to_string(),
            },
        );

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "notificationEmployeeByEmail": true,
                "notificationClientByEmail": false,
                "notificationClientBySms": {
                    "isSent": true,
                    "message": "quota low"
                }
            })
        );
    }

    #[test]
    fn test_rejectedはすべてのフラグがfalseでメッセージだけを持つ() {
        let result = DispatchResult::rejected("Empty resellerId");

        assert!(!result.notification_employee_by_email);
        assert!(!result.notification_client_by_email);
        assert!(!result.notification_client_by_sms.is_sent);
        assert_eq!(result.notification_client_by_sms.message, "Empty resellerId");
    }

    #[test]
    fn test_sms_outcomeのエラーは成功時でも引き継がれる() {
        let outcome = SmsOutcome {
            sent:  true,
            error: "delivered with delay".to_string(),
        };

        let result = SmsDispatchResult::from(outcome);

        assert!(result.is_sent);
        assert_eq!(result.message, "delivered with delay");
    }

    #[test]
    fn test_sms_outcomeはエラーフィールドが欠けていても読める() {
        let outcome: SmsOutcome = serde_json::from_value(json!({ "sent": true })).unwrap();
        assert_eq!(outcome, SmsOutcome::sent());
    }
}
