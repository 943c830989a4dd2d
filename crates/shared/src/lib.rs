//! # ReturnFlow 共有ユーティリティ
//!
//! ReturnFlow の全クレートから利用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, notifier）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える（トレーシング関連は feature で有効化）

pub mod event_log;
pub mod observability;
