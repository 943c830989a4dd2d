//! SMTP メール送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境ではローカルの SMTP サーバーに接続する。
//!
//! バッチの付帯情報は `X-Returnflow-*` ヘッダーとして各メッセージに付与する。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{
        Message,
        header::{ContentType, HeaderName, HeaderValue},
    },
};
use returnflow_domain::notification::{EmailBatch, EmailMessage, NotificationError};

use super::{EmailSender, send_each};

/// SMTP メール送信
///
/// 送信元アドレスはリセラーごとに異なるため、メッセージ側の `from` を使う。
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025）
    pub fn new(host: &str, port: u16) -> Self {
        // builder_dangerous: TLS なしで接続（ローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport }
    }

    /// バッチの付帯情報をヘッダーに変換する
    fn batch_headers(batch: &EmailBatch) -> Vec<HeaderValue> {
        let mut headers = vec![
            tag_header("X-Returnflow-Event", batch.event.to_string()),
            tag_header("X-Returnflow-Reseller-Id", batch.reseller_id.to_string()),
        ];
        if let Some(client_id) = batch.client_id {
            headers.push(tag_header("X-Returnflow-Client-Id", client_id.to_string()));
        }
        if let Some(differences_to) = batch.differences_to {
            headers.push(tag_header(
                "X-Returnflow-Differences-To",
                differences_to.to_string(),
            ));
        }
        headers
    }

    fn build_message(
        email: &EmailMessage,
        headers: &[HeaderValue],
    ) -> Result<Message, NotificationError> {
        let builder = Message::builder()
            .from(
                email
                    .from
                    .parse()
                    .map_err(|e| NotificationError::SendFailed(format!("送信元アドレス不正: {e}")))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN);

        headers
            .iter()
            .cloned()
            .fold(builder, |builder, header| builder.raw_header(header))
            .body(email.body.clone())
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }

    async fn send_one(
        &self,
        email: &EmailMessage,
        headers: &[HeaderValue],
    ) -> Result<(), NotificationError> {
        let message = Self::build_message(email, headers)?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))
    }
}

fn tag_header(name: &'static str, value: String) -> HeaderValue {
    HeaderValue::new(HeaderName::new_from_ascii_str(name), value)
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_batch(&self, batch: &EmailBatch) -> Result<(), NotificationError> {
        let headers = Self::batch_headers(batch);

        send_each(&batch.messages, |email| self.send_one(email, &headers)).await
    }
}
