//! # ReturnFlow ドメイン層
//!
//! 返品クレーム通知の中核となるドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//!      ↘               ↑
//!        ──────────────
//! ```
//!
//! ドメイン層はインフラ層（DB、メール送信、SMS ゲートウェイ）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`request`] - 返品通知リクエスト（緩い型付けのペイロードからの変換）
//! - [`contractor`] - リセラー、クライアント、従業員
//! - [`notification`] - 通知種別、メール/SMS の値オブジェクト、送信結果
//! - [`status`] - 返品ステータス
//! - [`template`] - メッセージテンプレートに渡すデータ

#[macro_use]
mod macros;

pub mod contractor;
pub mod error;
pub mod notification;
pub mod request;
pub mod status;
pub mod template;

pub use error::DomainError;
