//! Noop SMS 送信実装
//!
//! SMS を実際に送信せず、ログ出力のみ行う。常に送信成功を返す。

use async_trait::async_trait;
use returnflow_domain::notification::{SmsOutcome, SmsRequest};

use super::SmsSender;

/// Noop SMS 送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopSmsSender;

#[async_trait]
impl SmsSender for NoopSmsSender {
    async fn send(&self, request: &SmsRequest) -> SmsOutcome {
        tracing::info!(
            reseller_id = %request.reseller_id,
            client_id = %request.client_id,
            to_status = request.to_status,
            "Noop: SMS 送信をスキップ"
        );
        SmsOutcome::sent()
    }
}
