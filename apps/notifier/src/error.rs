//! # Notifier エラー定義
//!
//! 返品通知ユースケースのエラーと、問題詳細ドキュメント（RFC 7807 形式）への変換を定義する。
//!
//! エラーはいずれも送信開始**前**に発生する。送信開始後のチャネル単位の失敗は
//! エラーではなく [`DispatchResult`](returnflow_domain::notification::DispatchResult)
//! の各フラグに反映される。

use returnflow_domain::{DomainError, notification::NotificationError};
use returnflow_infra::InfraError;
use returnflow_shared::event_log::error as log_error;
use serde::Serialize;
use thiserror::Error;

/// エラーレスポンス（RFC 7807 Problem Details）
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

/// 返品通知ユースケースで発生するエラー
#[derive(Debug, Error)]
pub enum ReturnNotificationError {
    /// リクエストの検証に失敗（メッセージは呼び出し元へそのまま返す）
    #[error("{0}")]
    Validation(String),

    /// ペイロードの形式が不正
    #[error("不正なペイロード: {0}")]
    InvalidPayload(String),

    /// テンプレートデータに空の項目がある
    #[error("Template Data ({field}) is empty!")]
    TemplateData { field: &'static str },

    /// 参照データの取得に失敗
    #[error("参照データの取得に失敗: {0}")]
    Lookup(#[from] InfraError),

    /// メッセージのレンダリングに失敗
    #[error("メッセージのレンダリングに失敗: {0}")]
    Rendering(#[from] NotificationError),
}

impl From<DomainError> for ReturnNotificationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::InvalidPayload(msg),
            DomainError::IncompleteTemplateData { field } => Self::TemplateData { field },
        }
    }
}

impl ReturnNotificationError {
    /// 対応する HTTP ステータスコード
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidPayload(_) => 400,
            Self::TemplateData { .. } | Self::Lookup(_) | Self::Rendering(_) => 500,
        }
    }

    /// 問題詳細ドキュメントに変換する
    ///
    /// 参照・レンダリングの失敗は内部情報を含むため、詳細はログにのみ出力する。
    pub fn to_problem(&self) -> ErrorResponse {
        let (error_type, title, detail) = match self {
            Self::Validation(msg) | Self::InvalidPayload(msg) => (
                "https://returnflow.example.com/errors/validation-error",
                "Validation Error",
                msg.clone(),
            ),
            Self::TemplateData { .. } => (
                "https://returnflow.example.com/errors/incomplete-template-data",
                "Incomplete Template Data",
                self.to_string(),
            ),
            Self::Lookup(e) => {
                tracing::error!(
                    error.category = log_error::category::INFRASTRUCTURE,
                    error.kind = log_error::kind::ENTITY_LOOKUP,
                    "参照データの取得に失敗: {}",
                    e
                );
                (
                    "https://returnflow.example.com/errors/internal-error",
                    "Internal Server Error",
                    "内部エラーが発生しました".to_string(),
                )
            }
            Self::Rendering(e) => {
                tracing::error!(
                    error.category = log_error::category::INTERNAL,
                    error.kind = log_error::kind::TEMPLATE_RENDERING,
                    "メッセージのレンダリングに失敗: {}",
                    e
                );
                (
                    "https://returnflow.example.com/errors/internal-error",
                    "Internal Server Error",
                    "内部エラーが発生しました".to_string(),
                )
            }
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            title: title.to_string(),
            status: self.status_code(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use pretty_assertions::assert_eq;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// JSON ログの出力先
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(logs.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    #[test]
    fn test_検証エラーは400でメッセージをそのまま返す() {
        let err = ReturnNotificationError::Validation("Client not found!".to_string());

        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_problem(),
            ErrorResponse {
                error_type: "https://returnflow.example.com/errors/validation-error".to_string(),
                title:      "Validation Error".to_string(),
                status:     400,
                detail:     "Client not found!".to_string(),
            }
        );
    }

    #[test]
    fn test_テンプレートデータ不足は500で項目名を含む() {
        let err: ReturnNotificationError =
            DomainError::IncompleteTemplateData { field: "DATE" }.into();

        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_problem().detail, "Template Data (DATE) is empty!");
    }

    #[test]
    fn test_参照エラーは内部情報を隠す() {
        let err = ReturnNotificationError::Lookup(InfraError::unexpected("connection reset"));

        let problem = err.to_problem();

        assert_eq!(problem.status, 500);
        assert_eq!(problem.detail, "内部エラーが発生しました");
    }

    #[test]
    fn test_ペイロード形式エラーは400() {
        let err: ReturnNotificationError = DomainError::Validation("not an object".to_string()).into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_問題詳細のtypeフィールド名() {
        let json = serde_json::to_value(
            ReturnNotificationError::Validation("Expert not found!".to_string()).to_problem(),
        )
        .unwrap();

        assert_eq!(
            json["type"],
            "https://returnflow.example.com/errors/validation-error"
        );
        assert_eq!(json["status"], 400);
    }

    #[test]
    fn test_レンダリングエラーはエラー分類付きでログに出力する() {
        let err = ReturnNotificationError::Rendering(NotificationError::TemplateFailed(
            "en/client_email_body: unknown variable".to_string(),
        ));

        let logs = capture_logs(|| {
            err.to_problem();
        });

        assert!(logs.contains(r#""error.category":"internal""#));
        assert!(logs.contains(r#""error.kind":"template_rendering""#));
    }

    #[test]
    fn test_参照エラーはエラー分類付きでログに出力する() {
        let err = ReturnNotificationError::Lookup(InfraError::unexpected("connection reset"));

        let logs = capture_logs(|| {
            err.to_problem();
        });

        assert!(logs.contains(r#""error.category":"infrastructure""#));
        assert!(logs.contains(r#""error.kind":"entity_lookup""#));
    }
}
