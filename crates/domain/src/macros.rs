/// 整数ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i64` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 値から作成
/// - `as_i64()`: 内部値の取得
/// - `is_unset()`: 0（未指定）かどうか
/// - `From<i64>` impl
///
/// 外部システムの ID は数値で払い出されるため、UUID ではなく `i64` を使う。
///
/// # 使用例
///
/// ```rust
/// use returnflow_domain::contractor::ResellerId;
///
/// let id = ResellerId::new(42);
/// assert_eq!(id.as_i64(), 42);
/// assert_eq!(id.to_string(), "42");
/// assert!(!id.is_unset());
/// ```
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        $vis struct $Name(i64);

        impl $Name {
            /// 数値から ID を作成する
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// 内部の数値を取得する
            pub const fn as_i64(self) -> i64 {
                self.0
            }

            /// 未指定（0）かどうか
            pub const fn is_unset(self) -> bool {
                self.0 == 0
            }
        }

        impl From<i64> for $Name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}
