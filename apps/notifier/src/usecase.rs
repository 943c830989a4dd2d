//! # ユースケース層
//!
//! 返品通知のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと送信基盤を `Arc<dyn Trait>` で外部から注入
//! - **薄いエントリポイント**: `main` は配線と入出力のみを行い、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `return_notification`: 返品クレーム変更の通知

pub mod return_notification;

pub use return_notification::ReturnNotificationService;
