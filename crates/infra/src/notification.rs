//! # メール送信
//!
//! 返品通知メールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `EmailSender` trait でメール送信を抽象化
//! - **バッチ単位**: 1 チャネル分のメッセージ群を [`EmailBatch`] としてまとめて渡す
//! - **3 つの実装**: SMTP（開発用）、SES（本番用）、Noop（無効化・テスト用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択

mod noop;
mod ses;
mod smtp;

use std::future::Future;

use async_trait::async_trait;
pub use noop::NoopEmailSender;
use returnflow_domain::notification::{EmailBatch, EmailMessage, NotificationError};
pub use ses::SesEmailSender;
pub use smtp::SmtpEmailSender;

/// メール送信トレイト
///
/// バッチ内のメッセージはすべて送信を試み、1 通でも失敗していれば
/// 失敗した宛先をまとめた `Err` を返す。空のバッチは何もせず `Ok` を返す。
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// メールバッチを送信する
    async fn send_batch(&self, batch: &EmailBatch) -> Result<(), NotificationError>;
}

/// バッチ内のメッセージを 1 通ずつ送信し、失敗をまとめて返す
///
/// 途中のメッセージが失敗しても残りの送信は続ける。
async fn send_each<'a, F, Fut>(
    messages: &'a [EmailMessage],
    mut send: F,
) -> Result<(), NotificationError>
where
    F: FnMut(&'a EmailMessage) -> Fut,
    Fut: Future<Output = Result<(), NotificationError>>,
{
    let mut failures = Vec::new();
    for email in messages {
        if let Err(e) = send(email).await {
            failures.push(format!("{}: {e}", email.to));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(NotificationError::SendFailed(format!(
            "{}/{} 件の送信に失敗 [{}]",
            failures.len(),
            messages.len(),
            failures.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_email(to: &str) -> EmailMessage {
        EmailMessage {
            from:    "shop@example.com".to_string(),
            to:      to.to_string(),
            subject: "件名".to_string(),
            body:    "本文".to_string(),
        }
    }

    #[tokio::test]
    async fn test_途中の宛先が失敗しても残りの宛先に送信する() {
        let messages = vec![
            make_email("not-an-address"),
            make_email("b.manager@example.com"),
        ];
        let mut attempted = Vec::new();

        let result = send_each(&messages, |email| {
            attempted.push(email.to.clone());
            let outcome = if email.to.contains('@') {
                Ok(())
            } else {
                Err(NotificationError::SendFailed("宛先アドレス不正".to_string()))
            };
            async move { outcome }
        })
        .await;

        assert_eq!(attempted, vec!["not-an-address", "b.manager@example.com"]);
        let Err(NotificationError::SendFailed(message)) = result else {
            panic!("送信失敗が返るべき");
        };
        assert_eq!(message, "1/2 件の送信に失敗 [not-an-address: 送信に失敗: 宛先アドレス不正]");
    }

    #[tokio::test]
    async fn test_すべて成功すればokを返す() {
        let messages = vec![make_email("a@example.com"), make_email("b@example.com")];

        let result = send_each(&messages, |_| async { Ok(()) }).await;

        assert!(result.is_ok());
    }
}
