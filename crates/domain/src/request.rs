//! # 返品通知リクエスト
//!
//! 呼び出し元から届く緩い型付けの JSON ペイロードを、型付きの
//! [`ReturnNotificationRequest`] に一度だけ変換する境界。
//! ビジネスロジックは変換後の値だけを扱う。
//!
//! ## 型の強制変換ルール
//!
//! 既存の呼び出し元は数値を文字列で送ることがあるため、以下の規則で変換する:
//!
//! | 入力 | 整数項目 | 文字列項目 |
//! |------|---------|-----------|
//! | 数値 | 0 方向に切り捨て | 10 進表記 |
//! | 文字列 | 先頭の整数部分（`"12abc"` → 12、なければ 0） | そのまま |
//! | `true` / `false` | 1 / 0 | `"1"` / `""` |
//! | `null`・欠落・配列・オブジェクト | 0 | `""` |
//!
//! フィールド名は既存クライアントとの互換のため camelCase のまま読む。

use serde_json::{Map, Value};

use crate::{
    DomainError,
    contractor::{ContractorId, ResellerId},
    notification::NotificationType,
};

/// ステータス変更の差分（変更前 → 変更後の状態コード）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Differences {
    pub from: i64,
    pub to:   i64,
}

/// 返品通知リクエスト
///
/// `creator` と `creatorId` は別々のキーとして届く。前者はリセラーと作成者の解決に、
/// 後者はテンプレートデータの `CREATOR_ID` に使われる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnNotificationRequest {
    pub reseller_id:        ResellerId,
    /// 通知種別の生コード（[`NotificationType`] への変換は
    /// [`notification_type()`](Self::notification_type) で行う）
    pub notification_type:  i64,
    pub creator:            ContractorId,
    pub creator_id:         ContractorId,
    pub expert_id:          ContractorId,
    pub client_id:          ContractorId,
    pub complaint_id:       i64,
    pub complaint_number:   String,
    pub consumption_id:     i64,
    pub consumption_number: String,
    pub agreement_number:   String,
    pub date:               String,
    pub differences:        Option<Differences>,
}

impl ReturnNotificationRequest {
    /// ペイロードからリクエストを作成する
    ///
    /// `{"data": {...}}` 形式のエンベロープと、`data` の中身を直接渡す形式の両方を受け付ける。
    pub fn from_payload(payload: &Value) -> Result<Self, DomainError> {
        match payload.get("data") {
            Some(data) => Self::parse(data),
            None => Self::parse(payload),
        }
    }

    /// `data` オブジェクトからリクエストを作成する
    pub fn parse(data: &Value) -> Result<Self, DomainError> {
        let Some(fields) = data.as_object() else {
            return Err(DomainError::Validation(
                "リクエストデータは JSON オブジェクトである必要があります".to_string(),
            ));
        };

        Ok(Self {
            reseller_id:        ResellerId::new(int_field(fields, "resellerId")),
            notification_type:  int_field(fields, "notificationType"),
            creator:            ContractorId::new(int_field(fields, "creator")),
            creator_id:         ContractorId::new(int_field(fields, "creatorId")),
            expert_id:          ContractorId::new(int_field(fields, "expertId")),
            client_id:          ContractorId::new(int_field(fields, "clientId")),
            complaint_id:       int_field(fields, "complaintId"),
            complaint_number:   text_field(fields, "complaintNumber"),
            consumption_id:     int_field(fields, "consumptionId"),
            consumption_number: text_field(fields, "consumptionNumber"),
            agreement_number:   text_field(fields, "agreementNumber"),
            date:               text_field(fields, "date"),
            differences:        differences_field(fields),
        })
    }

    /// 通知種別（未知のコードは `None`）
    pub fn notification_type(&self) -> Option<NotificationType> {
        NotificationType::from_code(self.notification_type)
    }

    /// 変更後ステータス（差分がない場合は 0）
    pub fn differences_to(&self) -> i64 {
        self.differences.map_or(0, |d| d.to)
    }
}

fn int_field(fields: &Map<String, Value>, key: &str) -> i64 {
    fields.get(key).map_or(0, coerce_int)
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).map(coerce_text).unwrap_or_default()
}

/// `differences` は空でないオブジェクトの場合のみ差分として扱う
fn differences_field(fields: &Map<String, Value>) -> Option<Differences> {
    let inner = fields.get("differences")?.as_object()?;
    if inner.is_empty() {
        return None;
    }

    Some(Differences {
        from: int_field(inner, "from"),
        to:   int_field(inner, "to"),
    })
}

/// 任意の JSON 値を整数に変換する
pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            // 小数や i64 を超える値は 0 方向に切り捨て（範囲外は飽和）
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

/// 任意の JSON 値を文字列に変換する
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// 文字列先頭の整数部分を読み取る（前方の空白と符号を許容）
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn full_payload() -> Value {
        json!({
            "resellerId": 7,
            "notificationType": "2",
            "creator": "11",
            "creatorId": 11,
            "expertId": 12,
            "clientId": 13,
            "complaintId": "100",
            "complaintNumber": "CMP-100",
            "consumptionId": 200,
            "consumptionNumber": 300,
            "agreementNumber": "AG-1",
            "date": "2024-05-01",
            "differences": { "from": 1, "to": "2" }
        })
    }

    #[test]
    fn test_parseですべての項目を型付きで読み取る() {
        let request = ReturnNotificationRequest::parse(&full_payload()).unwrap();

        assert_eq!(
            request,
            ReturnNotificationRequest {
                reseller_id:        ResellerId::new(7),
                notification_type:  2,
                creator:            ContractorId::new(11),
                creator_id:         ContractorId::new(11),
                expert_id:          ContractorId::new(12),
                client_id:          ContractorId::new(13),
                complaint_id:       100,
                complaint_number:   "CMP-100".to_string(),
                consumption_id:     200,
                consumption_number: "300".to_string(),
                agreement_number:   "AG-1".to_string(),
                date:               "2024-05-01".to_string(),
                differences:        Some(Differences { from: 1, to: 2 }),
            }
        );
        assert_eq!(request.notification_type(), Some(NotificationType::Change));
        assert_eq!(request.differences_to(), 2);
    }

    #[test]
    fn test_from_payloadはdataエンベロープを展開する() {
        let envelope = json!({ "data": full_payload() });

        let from_envelope = ReturnNotificationRequest::from_payload(&envelope).unwrap();
        let direct = ReturnNotificationRequest::from_payload(&full_payload()).unwrap();

        assert_eq!(from_envelope, direct);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!([1, 2]))]
    #[case(json!("resellerId=1"))]
    #[case(json!({ "data": 5 }))]
    fn test_オブジェクト以外のペイロードはバリデーションエラー(#[case] payload: Value) {
        let result = ReturnNotificationRequest::from_payload(&payload);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_欠落した項目はゼロ値になる() {
        let request = ReturnNotificationRequest::parse(&json!({})).unwrap();

        assert!(request.reseller_id.is_unset());
        assert_eq!(request.notification_type, 0);
        assert_eq!(request.notification_type(), None);
        assert_eq!(request.complaint_number, "");
        assert_eq!(request.differences, None);
        assert_eq!(request.differences_to(), 0);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!({}))]
    #[case(json!([]))]
    #[case(json!([1, 2]))]
    #[case(json!("1->2"))]
    fn test_空または非オブジェクトのdifferencesは差分なし(#[case] differences: Value) {
        let request =
            ReturnNotificationRequest::parse(&json!({ "differences": differences })).unwrap();
        assert_eq!(request.differences, None);
    }

    #[test]
    fn test_toが無いdifferencesは変更後ステータスなしとして扱う() {
        let request =
            ReturnNotificationRequest::parse(&json!({ "differences": { "from": 1 } })).unwrap();

        let differences = request.differences.unwrap();
        assert_eq!(differences, Differences { from: 1, to: 0 });
        assert_eq!(request.differences_to(), 0);
    }

    #[rstest]
    #[case(json!(42), 42)]
    #[case(json!(-3), -3)]
    #[case(json!(4.9), 4)]
    #[case(json!(-4.9), -4)]
    #[case(json!("17"), 17)]
    #[case(json!("  17"), 17)]
    #[case(json!("12abc"), 12)]
    #[case(json!("-8"), -8)]
    #[case(json!("+8"), 8)]
    #[case(json!("abc"), 0)]
    #[case(json!(""), 0)]
    #[case(json!(true), 1)]
    #[case(json!(false), 0)]
    #[case(json!(null), 0)]
    #[case(json!([5]), 0)]
    #[case(json!({ "a": 1 }), 0)]
    fn test_coerce_intの変換規則(#[case] value: Value, #[case] expected: i64) {
        assert_eq!(coerce_int(&value), expected);
    }

    #[rstest]
    #[case(json!("CMP-1"), "CMP-1")]
    #[case(json!(300), "300")]
    #[case(json!(1.5), "1.5")]
    #[case(json!(true), "1")]
    #[case(json!(false), "")]
    #[case(json!(null), "")]
    #[case(json!(["x"]), "")]
    fn test_coerce_textの変換規則(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(coerce_text(&value), expected);
    }

    #[test]
    fn test_桁あふれする文字列は飽和する() {
        assert_eq!(coerce_int(&json!("99999999999999999999999")), i64::MAX);
    }
}
