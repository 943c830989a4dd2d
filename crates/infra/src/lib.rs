//! # ReturnFlow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ**: リセラー、取引先、通知先メールアドレスの参照
//! - **メール送信**: SMTP / SES / Noop の 3 実装
//! - **SMS 送信**: HTTP ゲートウェイ / Noop の 2 実装
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//!              ↓
//!            shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - [`notification`] - メール送信
//! - [`sms`] - SMS 送信
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod db;
pub mod error;
pub mod notification;
pub mod repository;
pub mod sms;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::{InfraError, InfraErrorKind};
