//! # SMS 送信
//!
//! クライアント宛 SMS の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **失敗は値で返す**: 送信基盤の結果は成否とエラーメッセージの組（[`SmsOutcome`]）であり、
//!   通信エラーも `Err` ではなく失敗の結果として返す
//! - **2 つの実装**: HTTP ゲートウェイ（本番用）、Noop（無効化・テスト用）
//! - **環境変数切替**: `SMS_BACKEND` でランタイム選択

mod http;
mod noop;

use async_trait::async_trait;
pub use http::HttpSmsSender;
pub use noop::NoopSmsSender;
use returnflow_domain::notification::{SmsOutcome, SmsRequest};

/// SMS 送信トレイト
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// SMS を送信し、その結果を返す
    async fn send(&self, request: &SmsRequest) -> SmsOutcome;
}
