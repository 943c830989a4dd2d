//! SES メール送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 本番環境で使用する。
//!
//! バッチの付帯情報（イベント種別、リセラー、クライアント、変更後ステータス）は
//! SES のメッセージタグとして付与し、配信イベントの集計に使う。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message, MessageTag},
};
use returnflow_domain::notification::{EmailBatch, EmailMessage, NotificationError};

use super::{EmailSender, send_each};

/// SES メール送信
///
/// `aws_sdk_sesv2::Client` をラップする。
pub struct SesEmailSender {
    client: Client,
}

impl SesEmailSender {
    /// 新しい SES 送信インスタンスを作成
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn build_tags(batch: &EmailBatch) -> Result<Vec<MessageTag>, NotificationError> {
        let mut pairs = vec![
            ("event", batch.event.to_string()),
            ("reseller_id", batch.reseller_id.to_string()),
        ];
        if let Some(client_id) = batch.client_id {
            pairs.push(("client_id", client_id.to_string()));
        }
        if let Some(differences_to) = batch.differences_to {
            pairs.push(("differences_to", differences_to.to_string()));
        }

        pairs
            .into_iter()
            .map(|(name, value)| {
                MessageTag::builder()
                    .name(name)
                    .value(value)
                    .build()
                    .map_err(|e| NotificationError::SendFailed(format!("タグ構築失敗: {e}")))
            })
            .collect()
    }

    fn build_content(email: &EmailMessage) -> Result<EmailContent, NotificationError> {
        let subject = Content::builder()
            .data(&email.subject)
            .build()
            .map_err(|e| NotificationError::SendFailed(format!("件名構築失敗: {e}")))?;
        let text = Content::builder()
            .data(&email.body)
            .build()
            .map_err(|e| NotificationError::SendFailed(format!("テキスト本文構築失敗: {e}")))?;

        Ok(EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(subject)
                    .body(Body::builder().text(text).build())
                    .build(),
            )
            .build())
    }

    async fn send_one(
        &self,
        email: &EmailMessage,
        tags: &[MessageTag],
    ) -> Result<(), NotificationError> {
        let destination = Destination::builder().to_addresses(&email.to).build();

        self.client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(Self::build_content(email)?)
            .set_email_tags(Some(tags.to_vec()))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(format!("SES 送信失敗: {e}")))
    }
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send_batch(&self, batch: &EmailBatch) -> Result<(), NotificationError> {
        if batch.messages.is_empty() {
            return Ok(());
        }

        let tags = Self::build_tags(batch)?;

        send_each(&batch.messages, |email| self.send_one(email, &tags)).await
    }
}
