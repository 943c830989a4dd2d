//! # ReturnFlow Notifier ライブラリ
//!
//! 返品通知のユースケースと、その設定・エラー・メッセージカタログを公開する。
//! バイナリ（`main.rs`）はここで定義した部品を配線するだけにとどめる。

pub mod config;
pub mod error;
pub mod message_catalog;
pub mod usecase;
