//! # テンプレートデータ
//!
//! メール件名・本文や SMS のテンプレートに渡すフラットなキー/値の集合。
//!
//! すべての項目が空でないことが送信の前提条件であり、1 つでも空なら
//! [`DomainError::IncompleteTemplateData`] で処理全体を中断する。
//! 空とみなすのは整数の 0、空文字列、文字列 `"0"` の 3 つ。

use serde::Serialize;

use crate::DomainError;

/// テンプレート項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateField {
    ComplaintId,
    ComplaintNumber,
    CreatorId,
    CreatorName,
    ExpertId,
    ExpertName,
    ClientId,
    ClientName,
    ConsumptionId,
    ConsumptionNumber,
    AgreementNumber,
    Date,
    Differences,
}

/// テンプレート項目の値（借用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateValue<'a> {
    Int(i64),
    Text(&'a str),
}

impl TemplateValue<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(value) => *value == 0,
            Self::Text(value) => value.is_empty() || *value == "0",
        }
    }
}

/// テンプレートデータ
///
/// `COMPLAINT_ID` 形式のキーで、宣言順のまま JSON オブジェクトにシリアライズされる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TemplateData {
    pub complaint_id:       i64,
    pub complaint_number:   String,
    pub creator_id:         i64,
    pub creator_name:       String,
    pub expert_id:          i64,
    pub expert_name:        String,
    pub client_id:          i64,
    pub client_name:        String,
    pub consumption_id:     i64,
    pub consumption_number: String,
    pub agreement_number:   String,
    pub date:               String,
    pub differences:        String,
}

impl TemplateData {
    /// 全項目を宣言順に列挙する
    pub fn entries(&self) -> [(TemplateField, TemplateValue<'_>); 13] {
        use TemplateField as F;
        use TemplateValue::{Int, Text};

        [
            (F::ComplaintId, Int(self.complaint_id)),
            (F::ComplaintNumber, Text(&self.complaint_number)),
            (F::CreatorId, Int(self.creator_id)),
            (F::CreatorName, Text(&self.creator_name)),
            (F::ExpertId, Int(self.expert_id)),
            (F::ExpertName, Text(&self.expert_name)),
            (F::ClientId, Int(self.client_id)),
            (F::ClientName, Text(&self.client_name)),
            (F::ConsumptionId, Int(self.consumption_id)),
            (F::ConsumptionNumber, Text(&self.consumption_number)),
            (F::AgreementNumber, Text(&self.agreement_number)),
            (F::Date, Text(&self.date)),
            (F::Differences, Text(&self.differences)),
        ]
    }

    /// 最初に見つかった空の項目
    pub fn first_empty_field(&self) -> Option<TemplateField> {
        self.entries()
            .into_iter()
            .find(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
    }

    /// すべての項目が埋まっていることを検証する
    pub fn ensure_complete(&self) -> Result<(), DomainError> {
        match self.first_empty_field() {
            Some(field) => Err(DomainError::IncompleteTemplateData {
                field: field.into(),
            }),
            None => Ok(()),
        }
    }
}
