//! # Notifier 設定
//!
//! 環境変数から返品通知プロセスの設定を読み込む。
//!
//! 不正な値はパニックせず [`ConfigError`] として返す。

use std::{collections::HashMap, env, time::Duration};

use returnflow_domain::contractor::ResellerId;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// 返品通知プロセスの設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// データベース接続 URL
    pub database_url:   String,
    /// 起動時にマイグレーションを適用するか
    pub run_migrations: bool,
    /// リクエスト冒頭のガード判定モード
    pub guard_mode:     GuardMode,
    /// メッセージカタログのロケール設定
    pub locale:         LocaleConfig,
    /// メール通知設定
    pub notification:   NotificationConfig,
    /// SMS 通知設定
    pub sms:            SmsConfig,
}

/// リクエスト冒頭の 2 つのガード（`resellerId` / `notificationType`）の判定方向
///
/// - `Legacy`: 値が**指定されている**とガードが作動する（既存システムの挙動）
/// - `Required`: 値が**未指定**だとガードが作動する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardMode {
    #[default]
    Legacy,
    Required,
}

impl GuardMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "legacy" => Ok(Self::Legacy),
            "required" => Ok(Self::Required),
            _ => Err(ConfigError::Invalid {
                name:  "RETURN_GUARD_MODE",
                value: value.to_string(),
            }),
        }
    }

    /// `resellerId` のガードが作動するか（作動時はソフトな拒否）
    pub fn rejects_reseller(self, reseller_id: ResellerId) -> bool {
        match self {
            Self::Legacy => !reseller_id.is_unset(),
            Self::Required => reseller_id.is_unset(),
        }
    }

    /// `notificationType` のガードが作動するか（作動時はバリデーションエラー）
    pub fn rejects_notification_type(self, notification_type: i64) -> bool {
        match self {
            Self::Legacy => notification_type != 0,
            Self::Required => notification_type == 0,
        }
    }
}

/// メッセージカタログのロケール設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// 上書きのないリセラーに使うロケール
    pub default_locale:   String,
    /// リセラーごとのロケール上書き
    pub reseller_locales: HashMap<ResellerId, String>,
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailBackend {
    Smtp,
    Ses,
    Noop,
}

/// メール通知の設定
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド（`NOTIFICATION_BACKEND`）
    pub backend:   EmailBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host: String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port: u16,
}

/// SMS 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsBackend {
    Http,
    Noop,
}

/// SMS 通知の設定
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// 送信バックエンド（`SMS_BACKEND`）
    pub backend:     SmsBackend,
    /// SMS ゲートウェイのベース URL（backend=http の場合に使用）
    pub gateway_url: String,
    /// SMS ゲートウェイへのリクエストタイムアウト
    pub timeout:     Duration,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|name| env::var(name).ok())
    }

    /// 任意の値ソースから設定を読み込む
    fn from_source(source: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str, default: &str| source(name).unwrap_or_else(|| default.to_string());

        let database_url = source("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            run_migrations: parse_flag("RUN_MIGRATIONS", &get("RUN_MIGRATIONS", "false"))?,
            guard_mode: GuardMode::parse(&get("RETURN_GUARD_MODE", "legacy"))?,
            locale: LocaleConfig {
                default_locale:   get("DEFAULT_LOCALE", "ru"),
                reseller_locales: parse_reseller_locales(&get("RESELLER_LOCALES", ""))?,
            },
            notification: NotificationConfig {
                backend:   parse_email_backend(&get("NOTIFICATION_BACKEND", "noop"))?,
                smtp_host: get("SMTP_HOST", "localhost"),
                smtp_port: parse_number("SMTP_PORT", &get("SMTP_PORT", "1025"))?,
            },
            sms: SmsConfig {
                backend:     parse_sms_backend(&get("SMS_BACKEND", "noop"))?,
                gateway_url: get("SMS_GATEWAY_URL", "http://localhost:8025"),
                timeout:     Duration::from_secs(parse_number(
                    "SMS_TIMEOUT_SECS",
                    &get("SMS_TIMEOUT_SECS", "10"),
                )?),
            },
        })
    }
}

fn parse_email_backend(value: &str) -> Result<EmailBackend, ConfigError> {
    match value {
        "smtp" => Ok(EmailBackend::Smtp),
        "ses" => Ok(EmailBackend::Ses),
        "noop" => Ok(EmailBackend::Noop),
        _ => Err(ConfigError::Invalid {
            name:  "NOTIFICATION_BACKEND",
            value: value.to_string(),
        }),
    }
}

fn parse_sms_backend(value: &str) -> Result<SmsBackend, ConfigError> {
    match value {
        "http" => Ok(SmsBackend::Http),
        "noop" => Ok(SmsBackend::Noop),
        _ => Err(ConfigError::Invalid {
            name:  "SMS_BACKEND",
            value: value.to_string(),
        }),
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// `RESELLER_LOCALES` を解析する
///
/// 形式: `7=en,12=ru`（空要素は無視する）
fn parse_reseller_locales(value: &str) -> Result<HashMap<ResellerId, String>, ConfigError> {
    let invalid = || ConfigError::Invalid {
        name:  "RESELLER_LOCALES",
        value: value.to_string(),
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (id, locale) = pair.split_once('=').ok_or_else(invalid)?;
            let id: i64 = id.trim().parse().map_err(|_| invalid())?;
            let locale = locale.trim();
            if locale.is_empty() {
                return Err(invalid());
            }
            Ok((ResellerId::new(id), locale.to_string()))
        })
        .collect()
}
