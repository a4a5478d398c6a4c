//! # 参加者表
//!
//! スプレッドシートから読み込んだ全行を保持し、登録番号による行検索と
//! 受付状況の集計を行う。
//!
//! ## 行番号
//!
//! 0 行目はヘッダーであり、データとして扱わない。
//! メモリ上は 0 始まり、スプレッドシート上は 1 始まりで数える。
//!
//! ```text
//! index 0  →  シート行 1  （ヘッダー）
//! index 1  →  シート行 2  （最初の参加者）
//! ```
//!
//! ## ライフサイクル
//!
//! 表はリクエストごとにストアから丸ごと読み直す。プロセス内でキャッシュしない。

use serde::Serialize;

use crate::attendee::{
   AttendeeRecord,
   CheckInStatus,
   REGISTRATION_NO_COLUMN,
   RegistrationQuery,
   STATUS_COLUMN,
   normalize_registration_no,
};

/// 表内の行位置（0 始まり、ヘッダーを含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowIndex(usize);

impl RowIndex {
   pub fn new(index: usize) -> Self {
      Self(index)
   }

   /// スプレッドシート上の行番号（1 始まり）
   pub fn sheet_row(&self) -> usize {
      self.0 + 1
   }
}

/// 行検索の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMatch {
   pub index:  RowIndex,
   pub record: AttendeeRecord,
}

/// 受付状況の集計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckInStats {
   /// データ行数（ヘッダーを除く）
   pub total:     usize,
   /// 受付済みの行数
   pub scanned:   usize,
   /// 未受付の行数（`total - scanned`）
   pub remaining: usize,
}

/// ヘッダー行付きの参加者表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendeeTable {
   rows: Vec<Vec<String>>,
}

impl AttendeeTable {
   pub fn new(rows: Vec<Vec<String>>) -> Self {
      Self { rows }
   }

   /// ヘッダーを除いたデータ行を位置付きで列挙する
   pub fn data_rows(&self) -> impl Iterator<Item = (RowIndex, &[String])> {
      self
         .rows
         .iter()
         .enumerate()
         .skip(1)
         .map(|(i, row)| (RowIndex(i), row.as_slice()))
   }

   /// 登録番号で行を検索する
   ///
   /// 先頭から順に走査し、正規化した登録番号が
   ///
   /// 1. 検索キーと完全一致する、または
   /// 2. 検索キーを含む / 検索キーに含まれる
   ///
   /// 最初の行を返す。完全一致を部分一致より優先することはしない。
   /// 登録番号が空（正規化後に空になるものを含む）の行は飛ばす。
   pub fn find_by_registration_no(&self, query: &RegistrationQuery) -> Option<RowMatch> {
      let needle = query.as_str();

      self.data_rows().find_map(|(index, row)| {
         let cell = row.get(REGISTRATION_NO_COLUMN)?;
         let candidate = normalize_registration_no(cell);
         if candidate.is_empty() {
            return None;
         }

         let matched =
            candidate == needle || candidate.contains(needle) || needle.contains(&candidate);
         matched.then(|| RowMatch {
            index,
            record: AttendeeRecord::from_row(row),
         })
      })
   }

   /// 受付状況を集計する
   pub fn stats(&self) -> CheckInStats {
      let total = self.rows.len().saturating_sub(1);
      let scanned = self
         .data_rows()
         .filter(|(_, row)| {
            row.get(STATUS_COLUMN)
               .is_some_and(|cell| CheckInStatus::from_cell(cell) == CheckInStatus::Scanned)
         })
         .count();

      CheckInStats {
         total,
         scanned,
         remaining: total - scanned,
      }
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::{fixture, rstest};

   use super::*;

   fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
      data
         .iter()
         .map(|row| row.iter().map(|s| s.to_string()).collect())
         .collect()
   }

   /// Alice（未受付）と Bob（受付済み）の 2 名
   #[fixture]
   fn table() -> AttendeeTable {
      AttendeeTable::new(rows(&[
         &["Name", "RegNo", "Status", "ScannedAt"],
         &["Alice", "REG-001", "", ""],
         &["Bob", "REG 002", "Scanned", "1/1/25, 10:00:00 am"],
      ]))
   }

   fn query(raw: &str) -> RegistrationQuery {
      RegistrationQuery::parse(raw).unwrap()
   }

   #[rstest]
   #[case("reg001")]
   #[case("REG-001")]
   #[case("Reg_001")]
   #[case(" r e g 0 0 1 ")]
   fn test_表記揺れがあっても検索できる(table: AttendeeTable, #[case] raw: &str) {
      let found = table.find_by_registration_no(&query(raw)).unwrap();

      assert_eq!(found.index, RowIndex::new(1));
      assert_eq!(found.record.name, "Alice");
      assert_eq!(found.record.status, CheckInStatus::NotScanned);
      assert_eq!(found.record.scanned_at, None);
   }

   #[rstest]
   fn test_存在しない登録番号はnone(table: AttendeeTable) {
      assert_eq!(table.find_by_registration_no(&query("XYZ-999")), None);
   }

   #[rstest]
   fn test_ヘッダー行は検索対象外(table: AttendeeTable) {
      assert_eq!(table.find_by_registration_no(&query("RegNo")), None);
   }

   #[rstest]
   fn test_検索キーが行の値を含む場合もマッチする(table: AttendeeTable) {
      // バーコードに接頭辞・接尾辞が付いているケース
      let found = table
         .find_by_registration_no(&query("EVT2025-REG002-X"))
         .unwrap();

      assert_eq!(found.index, RowIndex::new(2));
      assert_eq!(found.record.name, "Bob");
   }

   #[test]
   fn test_完全一致より先に見つかった部分一致を返す() {
      let table = AttendeeTable::new(rows(&[
         &["Name", "RegNo"],
         &["Carol", "REG-0011"],
         &["Dave", "REG-001"],
      ]));

      let found = table.find_by_registration_no(&query("reg001")).unwrap();

      assert_eq!(found.index, RowIndex::new(1));
      assert_eq!(found.record.name, "Carol");
   }

   #[test]
   fn test_登録番号が空の行は飛ばす() {
      let table = AttendeeTable::new(rows(&[
         &["Name", "RegNo"],
         &["NoReg"],
         &["Blank", ""],
         &["Dash", " - "],
         &["Eve", "REG-005"],
      ]));

      let found = table.find_by_registration_no(&query("reg005")).unwrap();

      assert_eq!(found.index, RowIndex::new(4));
      assert_eq!(found.record.name, "Eve");
   }

   #[test]
   fn test_シート行番号は1始まり() {
      assert_eq!(RowIndex::new(0).sheet_row(), 1);
      assert_eq!(RowIndex::new(2).sheet_row(), 3);
   }

   #[rstest]
   fn test_集計はヘッダーを除く(table: AttendeeTable) {
      assert_eq!(
         table.stats(),
         CheckInStats {
            total:     2,
            scanned:   1,
            remaining: 1,
         }
      );
   }

   #[test]
   fn test_集計は受付状態の大文字小文字を区別しない() {
      let table = AttendeeTable::new(rows(&[
         &["Name", "RegNo", "Status"],
         &["A", "1", "scanned"],
         &["B", "2", "SCANNED"],
         &["C", "3", "Scanned"],
         &["D", "4", "Pending"],
         &["E", "5"],
      ]));

      assert_eq!(
         table.stats(),
         CheckInStats {
            total:     5,
            scanned:   3,
            remaining: 2,
         }
      );
   }

   #[rstest]
   #[case(vec![])]
   #[case(rows(&[&["Name", "RegNo", "Status", "ScannedAt"]]))]
   fn test_データ行が無い表の集計はゼロ(#[case] data: Vec<Vec<String>>) {
      let stats = AttendeeTable::new(data).stats();

      assert_eq!(
         stats,
         CheckInStats {
            total:     0,
            scanned:   0,
            remaining: 0,
         }
      );
   }
}
