//! # テスト用インメモリストア
//!
//! ユースケース・API テストで使用する [`SheetStore`] のインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! gatepass-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! Sheets API と同様に、読み込み時は末尾の空セルと末尾の空行を省略して返す。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{error::InfraError, range::A1Range, sheets::SheetStore};

/// 記録された書き込み
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
   pub spreadsheet_id: String,
   pub range:          String,
   pub values:         Vec<Vec<String>>,
}

/// 失敗のシミュレーション
#[derive(Debug, Clone)]
pub enum StoreFailure {
   /// 2xx 以外のステータス
   Status(u16, String),
   /// タイムアウト
   Timeout,
}

impl StoreFailure {
   fn to_error(&self) -> InfraError {
      match self {
         Self::Status(status, body) => InfraError::status(*status, body.clone()),
         Self::Timeout => InfraError::timeout("operation timed out"),
      }
   }
}

#[derive(Debug, Default)]
struct State {
   rows:        Vec<Vec<String>>,
   read_ranges: Vec<String>,
   writes:      Vec<RecordedWrite>,
   failure:     Option<StoreFailure>,
}

/// インメモリの表形式ストア
///
/// 単一シートを保持し、シート名・スプレッドシート ID は記録のみ行う。
#[derive(Clone, Default)]
pub struct InMemorySheetStore {
   state: Arc<Mutex<State>>,
}

impl InMemorySheetStore {
   pub fn new() -> Self {
      Self::default()
   }

   /// 初期の行データを指定して作成する
   pub fn with_rows(rows: &[&[&str]]) -> Self {
      let store = Self::new();
      store.set_rows(rows);
      store
   }

   /// 行データを置き換える
   pub fn set_rows(&self, rows: &[&[&str]]) {
      self.state.lock().unwrap().rows = rows
         .iter()
         .map(|row| row.iter().map(|s| s.to_string()).collect())
         .collect();
   }

   /// 現在の行データ（書き込み反映後）
   pub fn rows(&self) -> Vec<Vec<String>> {
      self.state.lock().unwrap().rows.clone()
   }

   /// 以降のすべての呼び出しを失敗させる
   pub fn fail_with(&self, failure: StoreFailure) {
      self.state.lock().unwrap().failure = Some(failure);
   }

   /// 読み込まれた範囲（A1 表記）の履歴
   pub fn read_ranges(&self) -> Vec<String> {
      self.state.lock().unwrap().read_ranges.clone()
   }

   /// 書き込みの履歴
   pub fn writes(&self) -> Vec<RecordedWrite> {
      self.state.lock().unwrap().writes.clone()
   }
}

/// 末尾の空セルを取り除く
fn trim_trailing_empty(mut row: Vec<String>) -> Vec<String> {
   while row.last().is_some_and(String::is_empty) {
      row.pop();
   }
   row
}

#[async_trait]
impl SheetStore for InMemorySheetStore {
   async fn read_range(
      &self,
      _spreadsheet_id: &str,
      range: &A1Range,
   ) -> Result<Vec<Vec<String>>, InfraError> {
      let mut state = self.state.lock().unwrap();
      if let Some(failure) = &state.failure {
         return Err(failure.to_error());
      }
      state.read_ranges.push(range.to_string());

      let (first_row, last_row) = range.rows().unwrap_or((1, state.rows.len()));
      let mut rows: Vec<Vec<String>> = state
         .rows
         .iter()
         .skip(first_row.saturating_sub(1))
         .take(last_row + 1 - first_row.max(1))
         .map(|row| {
            let cells = row
               .iter()
               .skip(range.first_column())
               .take(range.last_column() + 1 - range.first_column())
               .cloned()
               .collect();
            trim_trailing_empty(cells)
         })
         .collect();

      while rows.last().is_some_and(Vec::is_empty) {
         rows.pop();
      }
      Ok(rows)
   }

   async fn write_range(
      &self,
      spreadsheet_id: &str,
      range: &A1Range,
      values: Vec<Vec<String>>,
   ) -> Result<(), InfraError> {
      let mut state = self.state.lock().unwrap();
      if let Some(failure) = &state.failure {
         return Err(failure.to_error());
      }

      let first_row = range
         .rows()
         .map(|(start, _)| start)
         .ok_or_else(|| InfraError::unexpected("行範囲の無い書き込みには未対応です"))?;

      for (offset, value_row) in values.iter().enumerate() {
         let index = first_row - 1 + offset;
         if state.rows.len() <= index {
            state.rows.resize(index + 1, Vec::new());
         }
         let row = &mut state.rows[index];
         for (col_offset, value) in value_row.iter().enumerate() {
            let col = range.first_column() + col_offset;
            if row.len() <= col {
               row.resize(col + 1, String::new());
            }
            row[col] = value.clone();
         }
      }

      state.writes.push(RecordedWrite {
         spreadsheet_id: spreadsheet_id.to_string(),
         range: range.to_string(),
         values,
      });
      Ok(())
   }
}
