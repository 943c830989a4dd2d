//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類とステータスコードの対応
//!
//! | エラー種別 | ステータス | 用途 |
//! |-----------|-----------|------|
//! | `Validation` | 400 | ペイロードの形式不正 |
//! | `IncompleteTemplateData` | 500 | テンプレートデータに空の項目がある |
//!
//! ステータスコードへの変換はユースケース層（notifier）で行う。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値の構造がビジネスルールに違反している場合に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// テンプレートデータの項目が空
    ///
    /// メッセージはそのまま呼び出し元に返されるため、既存クライアントとの
    /// 互換性のため英語の固定文言を維持する。
    #[error("Template Data ({field}) is empty!")]
    IncompleteTemplateData {
        /// 空だった項目名（例: `"DATE"`）
        field: &'static str,
    },
}
