//! # ビジネスイベントログの構造化ヘルパー
//!
//! `jq` で効率的に調査できるよう、ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`notification.channel`）を使用。JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。呼び出し側クレートは `tracing` に依存していること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.reseller_id`: リセラー ID
/// - `event.result`: 結果（[`event::result`] の定数を使用）
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const RETURN_NOTIFICATION: &str = "return_notification";
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        // リクエスト検証
        pub const REQUEST_REJECTED: &str = "request.rejected";

        // 通知
        pub const NOTIFICATION_SENT: &str = "notification.sent";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
        pub const NOTIFICATION_SKIPPED: &str = "notification.skipped";
    }

    /// 通知チャネル
    pub mod channel {
        /// メールチャネル共通（送信元アドレスの取得など）
        pub const EMAIL: &str = "email";
        pub const EMPLOYEE_EMAIL: &str = "employee_email";
        pub const CLIENT_EMAIL: &str = "client_email";
        pub const CLIENT_SMS: &str = "client_sms";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
        pub const SKIPPED: &str = "skipped";
    }
}

/// エラーコンテキストフィールドの定数
///
/// `tracing::error!` / `tracing::warn!` に `error.category` + `error.kind` として付与する。
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// 外部サービス呼び出し（SMTP、SES、SMS ゲートウェイ）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// プロセス内部の処理（テンプレートのレンダリングなど）
        pub const INTERNAL: &str = "internal";
    }

    /// エラー種別
    pub mod kind {
        pub const ENTITY_LOOKUP: &str = "entity_lookup";
        pub const RECIPIENT_LOOKUP: &str = "recipient_lookup";
        pub const TEMPLATE_RENDERING: &str = "template_rendering";
        pub const EMAIL_TRANSPORT: &str = "email_transport";
        pub const SMS_TRANSPORT: &str = "sms_transport";
    }
}
