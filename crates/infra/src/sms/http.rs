//! HTTP ゲートウェイ SMS 送信実装
//!
//! SMS ゲートウェイの `POST {base_url}/sms/send` に [`SmsRequest`] を JSON で送り、
//! `{"sent": bool, "error": string}` 形式の応答を [`SmsOutcome`] として受け取る。
//!
//! 通信エラー、非 2xx 応答、応答の解析失敗はいずれも送信失敗の結果に変換し、
//! エラーログを出力する。

use std::time::Duration;

use async_trait::async_trait;
use returnflow_domain::notification::{SmsOutcome, SmsRequest};
use returnflow_shared::event_log::error as log_error;

use super::SmsSender;
use crate::error::InfraError;

/// HTTP ゲートウェイ SMS 送信
#[derive(Debug, Clone)]
pub struct HttpSmsSender {
    base_url: String,
    client:   reqwest::Client,
}

impl HttpSmsSender {
    /// 新しい HTTP SMS 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `base_url`: SMS ゲートウェイのベース URL（例: `http://localhost:8025`）
    /// - `timeout`: 1 リクエストあたりのタイムアウト
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/sms/send", self.base_url)
    }

    async fn post(&self, request: &SmsRequest) -> Result<SmsOutcome, String> {
        let response = self
            .client
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| format!("SMS ゲートウェイ通信失敗: {e}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("SMS ゲートウェイ応答の読み取り失敗: {e}"))?;

        interpret_response(status, &body)
    }
}

/// ゲートウェイの応答を送信結果に変換する
fn interpret_response(status: reqwest::StatusCode, body: &str) -> Result<SmsOutcome, String> {
    if !status.is_success() {
        return Err(format!("予期しないステータス {status}: {body}"));
    }

    serde_json::from_str::<SmsOutcome>(body)
        .map_err(|e| format!("SMS ゲートウェイ応答の解析失敗: {e}"))
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(reseller_id = %request.reseller_id, client_id = %request.client_id)
    )]
    async fn send(&self, request: &SmsRequest) -> SmsOutcome {
        match self.post(request).await {
            Ok(outcome) => outcome,
            Err(message) => {
                tracing::error!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::SMS_TRANSPORT,
                    "{message}"
                );
                SmsOutcome::failed(message)
            }
        }
    }
}
