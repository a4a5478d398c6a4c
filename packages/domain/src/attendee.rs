//! # 参加者レコード
//!
//! スプレッドシートの 1 行（A〜D 列）に対応する参加者情報と、
//! 登録番号の比較に使う正規化ルールを定義する。
//!
//! ## 列構成
//!
//! | 列 | 内容 |
//! |----|------|
//! | A | 氏名 |
//! | B | 登録番号 |
//! | C | 受付状態（`Scanned` または空） |
//! | D | 受付時刻 |
//!
//! ## 正規化
//!
//! 登録番号はバーコードや手入力で表記揺れが生じるため、比較前に
//! 前後の空白除去 → 小文字化 → 空白・ハイフン・アンダースコア除去 を行う。
//!
//! ```rust
//! use gatepass_domain::attendee::normalize_registration_no;
//!
//! assert_eq!(normalize_registration_no(" REG-001 "), "reg001");
//! assert_eq!(normalize_registration_no("reg_0 01"), "reg001");
//! ```

use serde::Serialize;

use crate::DomainError;

/// 氏名の列番号（A 列）
pub const NAME_COLUMN: usize = 0;
/// 登録番号の列番号（B 列）
pub const REGISTRATION_NO_COLUMN: usize = 1;
/// 受付状態の列番号（C 列）
pub const STATUS_COLUMN: usize = 2;
/// 受付時刻の列番号（D 列）
pub const SCANNED_AT_COLUMN: usize = 3;

/// 登録番号を比較用に正規化する
///
/// 冪等であり、正規化済みの文字列を渡すとそのまま返る。
pub fn normalize_registration_no(raw: &str) -> String {
   raw.trim()
      .chars()
      .flat_map(char::to_lowercase)
      .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
      .collect()
}

/// 正規化済みの検索キー
///
/// 空の検索キーは部分一致で全行にマッチしてしまうため、
/// 構築時に拒否する。行検索は必ずこの型を経由する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationQuery(String);

impl RegistrationQuery {
   /// 生の入力から検索キーを作る
   ///
   /// 正規化後に空になる入力（未指定、空白のみ、`"--"` など）は
   /// `DomainError::Validation` を返す。
   pub fn parse(raw: &str) -> Result<Self, DomainError> {
      let normalized = normalize_registration_no(raw);
      if normalized.is_empty() {
         return Err(DomainError::Validation(
            "Registration number is required".to_string(),
         ));
      }
      Ok(Self(normalized))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// 受付状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckInStatus {
   /// 未受付（C 列が空、または `scanned` 以外）
   #[serde(rename = "Not Scanned")]
   NotScanned,
   /// 受付済み
   Scanned,
}

impl CheckInStatus {
   /// C 列の値から受付状態を判定する
   ///
   /// 大文字小文字を区別せず `scanned` と一致すれば受付済み。
   pub fn from_cell(cell: &str) -> Self {
      if cell.to_lowercase() == "scanned" {
         Self::Scanned
      } else {
         Self::NotScanned
      }
   }

   /// スプレッドシート・API レスポンス上の表記
   pub fn as_str(&self) -> &'static str {
      match self {
         Self::NotScanned => "Not Scanned",
         Self::Scanned => "Scanned",
      }
   }
}

impl std::fmt::Display for CheckInStatus {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.write_str(self.as_str())
   }
}

/// 参加者レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRecord {
   pub name:            String,
   pub registration_no: String,
   pub status:          CheckInStatus,
   /// 受付時刻（D 列が空なら `None`）
   pub scanned_at:      Option<String>,
}

impl AttendeeRecord {
   /// 1 行分のセルからレコードを組み立てる
   ///
   /// Sheets API は末尾の空セルを省略して返すため、足りない列は空として扱う。
   pub fn from_row(row: &[String]) -> Self {
      let cell = |index: usize| row.get(index).map(String::as_str).unwrap_or("");

      Self {
         name:            cell(NAME_COLUMN).to_string(),
         registration_no: cell(REGISTRATION_NO_COLUMN).to_string(),
         status:          CheckInStatus::from_cell(cell(STATUS_COLUMN)),
         scanned_at:      Some(cell(SCANNED_AT_COLUMN))
            .filter(|s| !s.is_empty())
            .map(str::to_string),
      }
   }

   pub fn is_checked_in(&self) -> bool {
      self.status == CheckInStatus::Scanned
   }
}
