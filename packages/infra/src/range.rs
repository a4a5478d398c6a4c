//! # A1 表記の範囲指定
//!
//! Sheets API はセル範囲を `Sheet1!A:D` や `Sheet1!C5:D5` のような A1 表記で受け取る。
//! 文字列を直接組み立てる代わりに [`A1Range`] で列・行を型として扱い、
//! 書式化はこのモジュールに閉じ込める。
//!
//! 列番号・行番号の規約:
//!
//! - 列は 0 始まり（`0` → `A`, `25` → `Z`, `26` → `AA`）
//! - 行は 1 始まり（シート上の表示と同じ）

use std::fmt;

/// シート名と列・行範囲からなるセル範囲
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
   sheet:        String,
   first_column: usize,
   last_column:  usize,
   /// 行範囲（1 始まり、両端を含む）。`None` は列全体
   rows:         Option<(usize, usize)>,
}

impl A1Range {
   /// 列全体の範囲（例: `Sheet1!A:D`）
   pub fn columns(sheet: impl Into<String>, first_column: usize, last_column: usize) -> Self {
      Self {
         sheet: sheet.into(),
         first_column,
         last_column,
         rows: None,
      }
   }

   /// 1 行内の列範囲（例: `Sheet1!C5:D5`）
   pub fn row_span(
      sheet: impl Into<String>,
      row: usize,
      first_column: usize,
      last_column: usize,
   ) -> Self {
      Self {
         sheet: sheet.into(),
         first_column,
         last_column,
         rows: Some((row, row)),
      }
   }

   pub fn first_column(&self) -> usize {
      self.first_column
   }

   pub fn last_column(&self) -> usize {
      self.last_column
   }

   pub fn rows(&self) -> Option<(usize, usize)> {
      self.rows
   }
}

/// 0 始まりの列番号を列記号に変換する（`0` → `A`, `27` → `AB`）
pub fn column_letter(index: usize) -> String {
   let mut n = index + 1;
   let mut letters = Vec::new();
   while n > 0 {
      let rem = (n - 1) % 26;
      letters.push(char::from(b'A' + rem as u8));
      n = (n - 1) / 26;
   }
   letters.iter().rev().collect()
}

/// シート名を A1 表記用に引用する
///
/// 英数字とアンダースコアのみなら引用不要。それ以外は `'...'` で囲み、
/// 内部の `'` は `''` にエスケープする。
fn quote_sheet_name(name: &str) -> String {
   if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
      name.to_string()
   } else {
      format!("'{}'", name.replace('\'', "''"))
   }
}

impl fmt::Display for A1Range {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      let sheet = quote_sheet_name(&self.sheet);
      let first = column_letter(self.first_column);
      let last = column_letter(self.last_column);

      match self.rows {
         None => write!(f, "{sheet}!{first}:{last}"),
         Some((start, end)) => write!(f, "{sheet}!{first}{start}:{last}{end}"),
      }
   }
}
