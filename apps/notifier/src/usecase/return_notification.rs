//! # 返品通知ユースケース
//!
//! 返品クレームの変更を受け取り、従業員メール・クライアントメール・クライアント SMS の
//! 3 チャネルに通知する。
//!
//! ## 処理の流れ
//!
//! ```text
//! payload ─▶ RequestValidator ─▶ DifferenceMessageBuilder ─▶ TemplateData
//!                 │                                            │ 完全性チェック
//!                 ▼                                            ▼
//!          ソフトな拒否                          NotificationDispatcher（3 チャネル並行）
//!                                                              │
//!                                                              ▼
//!                                                       DispatchResult
//! ```
//!
//! エラーはすべて送信開始前に発生する。送信開始後の失敗はチャネル単位で結果に反映される。

mod difference;
mod dispatcher;
mod service;
mod template_data;
mod validator;

#[cfg(test)]
mod fixtures;

pub use difference::DifferenceMessageBuilder;
pub use dispatcher::{ComposedMessages, DispatchContext, NotificationDispatcher, RETURN_PERMIT};
pub use service::ReturnNotificationService;
pub use template_data::build_template_data;
pub use validator::{RequestValidator, ResolvedParties, ValidationOutcome};
