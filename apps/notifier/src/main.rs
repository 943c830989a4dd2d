//! # ReturnFlow Notifier
//!
//! 返品クレームの変更通知を 1 件処理して終了するプロセス。
//!
//! ## 入出力
//!
//! - **stdin**: リクエスト JSON（`{"data": {...}}` または `data` の中身）
//! - **stdout**: 処理結果（`DispatchResult`）の JSON
//! - **stderr**: ログ、および致命的エラー時の問題詳細 JSON
//!
//! 致命的エラーの終了コードは、入力起因（400）なら 2、内部起因（500）なら 1。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `RUN_MIGRATIONS` | No | `true` で起動時にマイグレーションを適用（デフォルト: `false`） |
//! | `RETURN_GUARD_MODE` | No | `legacy` / `required`（デフォルト: `legacy`） |
//! | `DEFAULT_LOCALE` | No | メッセージカタログの既定ロケール（デフォルト: `ru`） |
//! | `RESELLER_LOCALES` | No | リセラーごとのロケール（例: `7=en,12=ru`） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `ses` / `noop`（デフォルト: `noop`） |
//! | `SMS_BACKEND` | No | `http` / `noop`（デフォルト: `noop`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! echo '{"data": {...}}' | cargo run -p returnflow-notifier
//! ```

use std::{process::ExitCode, sync::Arc};

use anyhow::Context as _;
use returnflow_infra::{
    db,
    notification::{EmailSender, NoopEmailSender, SesEmailSender, SmtpEmailSender},
    repository::{
        PostgresContractorRepository,
        PostgresRecipientRepository,
        PostgresResellerRepository,
    },
    sms::{HttpSmsSender, NoopSmsSender, SmsSender},
};
use returnflow_notifier::{
    config::{EmailBackend, NotifierConfig, SmsBackend},
    error::ReturnNotificationError,
    message_catalog::{Localizer, ReturnStatusNames, TeraLocalizer},
    usecase::{
        ReturnNotificationService,
        return_notification::{DifferenceMessageBuilder, NotificationDispatcher, RequestValidator},
    },
};
use returnflow_shared::observability::{self, TracingConfig};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("returnflow-notifier");
    observability::init_tracing(&tracing_config);

    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    if config.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("マイグレーションの適用に失敗しました")?;
        tracing::info!("マイグレーションを適用しました");
    }

    let email_sender: Arc<dyn EmailSender> = match config.notification.backend {
        EmailBackend::Smtp => {
            tracing::info!(
                host = %config.notification.smtp_host,
                port = config.notification.smtp_port,
                "SMTP メール送信を使用します"
            );
            Arc::new(SmtpEmailSender::new(
                &config.notification.smtp_host,
                config.notification.smtp_port,
            ))
        }
        EmailBackend::Ses => {
            tracing::info!("SES メール送信を使用します");
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            Arc::new(SesEmailSender::new(aws_sdk_sesv2::Client::new(&aws_config)))
        }
        EmailBackend::Noop => {
            tracing::info!("メール送信は無効です（Noop）");
            Arc::new(NoopEmailSender)
        }
    };

    let sms_sender: Arc<dyn SmsSender> = match config.sms.backend {
        SmsBackend::Http => {
            tracing::info!(gateway = %config.sms.gateway_url, "HTTP SMS ゲートウェイを使用します");
            Arc::new(
                HttpSmsSender::new(&config.sms.gateway_url, config.sms.timeout)
                    .context("SMS クライアントの初期化に失敗しました")?,
            )
        }
        SmsBackend::Noop => {
            tracing::info!("SMS 送信は無効です（Noop）");
            Arc::new(NoopSmsSender)
        }
    };

    let localizer: Arc<dyn Localizer> = Arc::new(
        TeraLocalizer::new(
            &config.locale.default_locale,
            config.locale.reseller_locales.clone(),
        )
        .context("メッセージカタログの初期化に失敗しました")?,
    );

    let service = ReturnNotificationService::new(
        RequestValidator::new(
            Arc::new(PostgresResellerRepository::new(pool.clone())),
            Arc::new(PostgresContractorRepository::new(pool.clone())),
            config.guard_mode,
        ),
        DifferenceMessageBuilder::new(localizer.clone(), Arc::new(ReturnStatusNames)),
        NotificationDispatcher::new(
            Arc::new(PostgresRecipientRepository::new(pool)),
            email_sender,
            sms_sender,
            localizer,
        ),
    );

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("標準入力の読み込みに失敗しました")?;

    let outcome = match serde_json::from_str(&input) {
        Ok(payload) => service.process_payload(&payload).await,
        Err(e) => Err(ReturnNotificationError::InvalidPayload(e.to_string())),
    };

    match outcome {
        Ok(result) => {
            println!("{}", serde_json::to_string(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string(&e.to_problem())?);
            Ok(if e.status_code() == 400 {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
