//! # 取引先（コントラクター）
//!
//! 通知に登場する当事者を表す。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`ResellerContext`] | リセラー | 通知を発行するテナント（販売事業者） |
//! | [`ClientContext`] | クライアント | 返品を申し立てた顧客。`type == CUSTOMER` であること |
//! | [`EmployeeContext`] | 従業員 | クレームの作成者（creator）と担当エキスパート（expert） |
//!
//! いずれも外部のリゾルバーから読み取り専用で受け取る。ユースケースは値を変更しない。

use serde::{Deserialize, Serialize};

define_numeric_id! {
    /// リセラー ID
    pub struct ResellerId;
}

define_numeric_id! {
    /// 取引先 ID
    ///
    /// クライアントと従業員は同じ取引先テーブルに属するため、ID 型を共有する。
    pub struct ContractorId;
}

/// 取引先種別
///
/// DB の `contractors.type` カラムに整数で格納される。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::FromRepr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ContractorType {
    /// 顧客
    Customer = 0,
    /// 従業員
    Employee = 1,
    /// 販売事業者
    Seller = 2,
}

/// リセラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResellerContext {
    pub id:   ResellerId,
    pub name: String,
}

/// クライアント（顧客）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientContext {
    pub id:              ContractorId,
    pub contractor_type: ContractorType,
    /// 所属リセラー。取引先がどのリセラーにも紐づかない場合は `None`
    pub reseller_id:     Option<ResellerId>,
    pub email:           String,
    pub mobile:          String,
    pub name:            String,
    pub full_name:       String,
}

impl ClientContext {
    /// 顧客種別かどうか
    pub fn is_customer(&self) -> bool {
        self.contractor_type == ContractorType::Customer
    }

    /// 指定リセラーに所属しているかどうか
    ///
    /// 所属リセラーを持たない取引先は、未指定（0）のリセラーに所属しているものとみなす。
    pub fn belongs_to(&self, reseller_id: ResellerId) -> bool {
        self.reseller_id
            .map_or(reseller_id.is_unset(), |own| own == reseller_id)
    }

    /// 表示名（フルネームが空なら名前にフォールバック）
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }
}

/// 従業員（作成者・エキスパート）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeContext {
    pub id:        ContractorId,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn make_client(full_name: &str, name: &str) -> ClientContext {
        ClientContext {
            id:              ContractorId::new(10),
            contractor_type: ContractorType::Customer,
            reseller_id:     Some(ResellerId::new(1)),
            email:           "client@example.com".to_string(),
            mobile:          "+79990000000".to_string(),
            name:            name.to_string(),
            full_name:       full_name.to_string(),
        }
    }

    #[test]
    fn test_display_nameはフルネームを優先する() {
        let client = make_client("Иванов Иван", "Иван");
        assert_eq!(client.display_name(), "Иванов Иван");
    }

    #[test]
    fn test_display_nameはフルネームが空なら名前を返す() {
        let client = make_client("", "Иван");
        assert_eq!(client.display_name(), "Иван");
    }

    #[test]
    fn test_belongs_toは所属リセラーが一致する場合にtrue() {
        let client = make_client("A", "A");
        assert!(client.belongs_to(ResellerId::new(1)));
        assert!(!client.belongs_to(ResellerId::new(2)));

        let orphan = ClientContext {
            reseller_id: None,
            ..make_client("A", "A")
        };
        assert!(!orphan.belongs_to(ResellerId::new(1)));
        assert!(orphan.belongs_to(ResellerId::new(0)));
    }

    #[rstest]
    #[case(0, Some(ContractorType::Customer))]
    #[case(1, Some(ContractorType::Employee))]
    #[case(2, Some(ContractorType::Seller))]
    #[case(3, None)]
    fn test_contractor_typeは整数から復元できる(
        #[case] code: i32,
        #[case] expected: Option<ContractorType>,
    ) {
        assert_eq!(ContractorType::from_repr(code), expected);
    }

    #[test]
    fn test_contractor_typeの表示はスクリーミングスネークケース() {
        assert_eq!(ContractorType::Customer.to_string(), "CUSTOMER");
    }
}
