//! # Gate Pass ドメイン層
//!
//! 受付（チェックイン）業務の中核となるモデルとルールを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はスプレッドシートや HTTP には一切依存しない。
//! 行データ（`Vec<Vec<String>>`）を受け取り、検索・集計するだけの純粋なロジックに留める。
//!
//! ## モジュール構成
//!
//! - [`attendee`] - 参加者レコード、受付状態、登録番号の正規化
//! - [`table`] - 参加者表（ヘッダー行付き）と行検索・集計
//! - [`clock`] - 時刻プロバイダと受付時刻の IST 表記
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use gatepass_domain::{attendee::RegistrationQuery, table::AttendeeTable};
//!
//! let table = AttendeeTable::new(vec![
//!    vec!["Name".into(), "RegNo".into(), "Status".into(), "ScannedAt".into()],
//!    vec!["Alice".into(), "REG-001".into()],
//! ]);
//!
//! let query = RegistrationQuery::parse("reg 001").unwrap();
//! let found = table.find_by_registration_no(&query).unwrap();
//! assert_eq!(found.record.name, "Alice");
//! ```

pub mod attendee;
pub mod clock;
pub mod error;
pub mod table;

pub use error::DomainError;
