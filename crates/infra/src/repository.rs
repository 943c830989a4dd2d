//! # リポジトリ
//!
//! ユースケースが参照する外部データの取得口。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: ユースケースは `Arc<dyn Trait>` 経由でのみ利用し、テストではモックに差し替える
//! - **不在は `Ok(None)`**: 見つからないことはエラーではなく、呼び出し側が判断する
//! - **読み取り専用**: 本サービスは参照のみを行い、書き込みは行わない

pub mod contractor_repository;
pub mod recipient_repository;
pub mod reseller_repository;

pub use contractor_repository::{ContractorRepository, PostgresContractorRepository};
pub use recipient_repository::{PostgresRecipientRepository, RecipientRepository};
pub use reseller_repository::{PostgresResellerRepository, ResellerRepository};
