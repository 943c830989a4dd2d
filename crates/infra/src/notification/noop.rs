//! Noop メール送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。

use async_trait::async_trait;
use returnflow_domain::notification::{EmailBatch, NotificationError};

use super::EmailSender;

/// Noop メール送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopEmailSender;

#[async_trait]
impl EmailSender for NoopEmailSender {
    async fn send_batch(&self, batch: &EmailBatch) -> Result<(), NotificationError> {
        for message in &batch.messages {
            tracing::info!(
                reseller_id = %batch.reseller_id,
                event = %batch.event,
                to = %message.to,
                subject = %message.subject,
                "Noop: メール送信をスキップ"
            );
        }
        Ok(())
    }
}
