//! # 返品ステータス
//!
//! 返品ポジションの状態コードと表示名。変更通知の `differences.from` / `differences.to`
//! にはこのコードが数値で入る。

use serde::{Deserialize, Serialize};

/// 返品ステータス
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
    strum::FromRepr,
)]
#[repr(i64)]
pub enum ReturnStatus {
    /// 完了
    Completed = 0,
    /// 処理中
    Pending = 1,
    /// 却下
    Rejected = 2,
}

impl ReturnStatus {
    /// 状態コードから復元する（未知のコードは `None`）
    pub fn from_code(code: i64) -> Option<Self> {
        Self::from_repr(code)
    }

    /// 表示名
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "Completed")]
    #[case(1, "Pending")]
    #[case(2, "Rejected")]
    fn test_状態コードから表示名を引ける(#[case] code: i64, #[case] expected: &str) {
        let status = ReturnStatus::from_code(code).unwrap();
        assert_eq!(status.name(), expected);
    }

    #[test]
    fn test_未知の状態コードはnoneを返す() {
        assert_eq!(ReturnStatus::from_code(3), None);
        assert_eq!(ReturnStatus::from_code(-1), None);
    }
}
