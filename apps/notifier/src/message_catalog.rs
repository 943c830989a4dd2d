//! # メッセージカタログ
//!
//! 通知文面のローカライズと、返品ステータスの表示名解決を担当する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: `templates/messages/{locale}/{key}.txt` を
//!   tera に登録する。実行時にファイルを読まない
//! - **リセラー単位のロケール**: 既定ロケールに加え、リセラーごとの上書きを持つ
//! - **trait による抽象化**: ユースケースは [`Localizer`] / [`StatusNames`] 経由でのみ利用する
//!
//! テンプレートに渡すパラメータのキーは大文字（`FROM`、`COMPLAINT_NUMBER` など）。

use std::collections::HashMap;

use returnflow_domain::{
    contractor::ResellerId,
    notification::NotificationError,
    status::ReturnStatus,
};
use tera::{Context, Tera};

/// カタログに登録済みのロケール
pub const SUPPORTED_LOCALES: [&str; 2] = ["ru", "en"];

/// メッセージキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MessageKey {
    /// ポジション追加の差分説明
    NewPositionAdded,
    /// ステータス変更の差分説明（`FROM` / `TO`）
    PositionStatusHasChanged,
    /// 従業員宛メールの件名
    EmployeeEmailSubject,
    /// 従業員宛メールの本文
    EmployeeEmailBody,
    /// クライアント宛メールの件名
    ClientEmailSubject,
    /// クライアント宛メールの本文
    ClientEmailBody,
}

/// リセラーのロケールでメッセージを組み立てる
pub trait Localizer: Send + Sync {
    fn localize(
        &self,
        key: MessageKey,
        params: &Context,
        reseller_id: ResellerId,
    ) -> Result<String, NotificationError>;
}

/// 返品ステータスコードの表示名を解決する
pub trait StatusNames: Send + Sync {
    fn status_name(&self, code: i64) -> String;
}

macro_rules! catalog_entry {
    ($locale:literal, $key:literal) => {
        (
            concat!($locale, "/", $key),
            include_str!(concat!("../templates/messages/", $locale, "/", $key, ".txt")),
        )
    };
}

/// tera ベースの Localizer
pub struct TeraLocalizer {
    engine:           Tera,
    default_locale:   String,
    reseller_locales: HashMap<ResellerId, String>,
}

impl TeraLocalizer {
    /// 新しいカタログを作成する
    ///
    /// 未登録のロケールが指定された場合はエラーを返す。
    pub fn new(
        default_locale: &str,
        reseller_locales: HashMap<ResellerId, String>,
    ) -> Result<Self, NotificationError> {
        if let Some(unknown) = std::iter::once(default_locale)
            .chain(reseller_locales.values().map(String::as_str))
            .find(|locale| !SUPPORTED_LOCALES.contains(locale))
        {
            return Err(NotificationError::TemplateFailed(format!(
                "未対応のロケール: {unknown}"
            )));
        }

        let mut engine = Tera::default();
        engine
            .add_raw_templates(vec![
                catalog_entry!("ru", "new_position_added"),
                catalog_entry!("ru", "position_status_has_changed"),
                catalog_entry!("ru", "employee_email_subject"),
                catalog_entry!("ru", "employee_email_body"),
                catalog_entry!("ru", "client_email_subject"),
                catalog_entry!("ru", "client_email_body"),
                catalog_entry!("en", "new_position_added"),
                catalog_entry!("en", "position_status_has_changed"),
                catalog_entry!("en", "employee_email_subject"),
                catalog_entry!("en", "employee_email_body"),
                catalog_entry!("en", "client_email_subject"),
                catalog_entry!("en", "client_email_body"),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self {
            engine,
            default_locale: default_locale.to_string(),
            reseller_locales,
        })
    }

    fn locale_for(&self, reseller_id: ResellerId) -> &str {
        self.reseller_locales
            .get(&reseller_id)
            .unwrap_or(&self.default_locale)
    }
}

impl Localizer for TeraLocalizer {
    fn localize(
        &self,
        key: MessageKey,
        params: &Context,
        reseller_id: ResellerId,
    ) -> Result<String, NotificationError> {
        let template_name = format!("{}/{key}", self.locale_for(reseller_id));

        let rendered = self
            .engine
            .render(&template_name, params)
            .map_err(|e| NotificationError::TemplateFailed(format!("{template_name}: {e}")))?;

        Ok(rendered.trim().to_string())
    }
}

/// [`ReturnStatus`] に基づく StatusNames
///
/// 未知のコードはコードそのものを文字列で返す。
#[derive(Debug, Clone, Default)]
pub struct ReturnStatusNames;

impl StatusNames for ReturnStatusNames {
    fn status_name(&self, code: i64) -> String {
        ReturnStatus::from_code(code)
            .map_or_else(|| code.to_string(), |status| status.name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn make_localizer() -> TeraLocalizer {
        let overrides = HashMap::from([(ResellerId::new(7), "en".to_string())]);
        TeraLocalizer::new("ru", overrides).unwrap()
    }

    #[test]
    fn test_既定ロケールで差分説明を組み立てる() {
        let localizer = make_localizer();

        let message = localizer
            .localize(MessageKey::NewPositionAdded, &Context::new(), ResellerId::new(1))
            .unwrap();

        assert_eq!(message, "Добавлена новая позиция");
    }

    #[test]
    fn test_リセラーごとのロケールで組み立てる() {
        let localizer = make_localizer();
        let mut params = Context::new();
        params.insert("FROM", "Pending");
        params.insert("TO", "Completed");

        let message = localizer
            .localize(MessageKey::PositionStatusHasChanged, &params, ResellerId::new(7))
            .unwrap();

        assert_eq!(message, "Position status changed: \"Pending\" → \"Completed\"");
    }

    #[test]
    fn test_パラメータ不足はレンダリングエラーになる() {
        let localizer = make_localizer();

        let result = localizer.localize(
            MessageKey::PositionStatusHasChanged,
            &Context::new(),
            ResellerId::new(1),
        );

        assert!(matches!(result, Err(NotificationError::TemplateFailed(_))));
    }

    #[test]
    fn test_未対応のロケールはエラーになる() {
        let result = TeraLocalizer::new("de", HashMap::new());
        assert!(matches!(result, Err(NotificationError::TemplateFailed(_))));

        let overrides = HashMap::from([(ResellerId::new(3), "fr".to_string())]);
        let result = TeraLocalizer::new("ru", overrides);
        assert!(matches!(result, Err(NotificationError::TemplateFailed(_))));
    }

    #[test]
    fn test_メッセージキーはスネークケースのテンプレート名になる() {
        assert_eq!(MessageKey::EmployeeEmailSubject.to_string(), "employee_email_subject");
    }

    #[rstest]
    #[case(0, "Completed")]
    #[case(1, "Pending")]
    #[case(2, "Rejected")]
    #[case(42, "42")]
    #[case(-1, "-1")]
    fn test_ステータス表示名を解決する(#[case] code: i64, #[case] expected: &str) {
        assert_eq!(ReturnStatusNames.status_name(code), expected);
    }
}
