//! # 参加者リポジトリ
//!
//! 参加者表の読み込みと、受付結果（C 列・D 列）の書き込みを担当する。
//!
//! ## 設計判断
//!
//! - 表はキャッシュせず、[`AttendeeRepository::load_table`] のたびに A〜D 列を丸ごと読み直す
//! - 書き込みは対象行の 2 セル（受付状態・受付時刻）だけを更新し、表全体は書き換えない
//! - 読み込みと書き込みの間に排他制御はない。同じ参加者への同時チェックインは
//!   両方とも成功し得る（ユースケース層の再確認オプションで緩和できる）

use std::sync::Arc;

use async_trait::async_trait;
use gatepass_domain::{
   attendee::{CheckInStatus, NAME_COLUMN, SCANNED_AT_COLUMN, STATUS_COLUMN},
   table::{AttendeeTable, RowIndex},
};

use crate::{error::InfraError, range::A1Range, sheets::SheetStore};

/// 参加者リポジトリトレイト
#[async_trait]
pub trait AttendeeRepository: Send + Sync {
   /// 参加者表をストアから丸ごと読み込む
   async fn load_table(&self) -> Result<AttendeeTable, InfraError>;

   /// 指定行を受付済みにし、受付時刻を書き込む
   ///
   /// # 引数
   ///
   /// - `index`: 表内の行位置（0 始まり、ヘッダーを含む）
   /// - `scanned_at`: 書き込む受付時刻の文字列
   async fn mark_checked_in(&self, index: RowIndex, scanned_at: &str) -> Result<(), InfraError>;
}

/// Sheets をバックエンドとするリポジトリ実装
pub struct SheetsAttendeeRepository {
   store:          Arc<dyn SheetStore>,
   spreadsheet_id: String,
   sheet_name:     String,
}

impl SheetsAttendeeRepository {
   pub fn new(
      store: Arc<dyn SheetStore>,
      spreadsheet_id: impl Into<String>,
      sheet_name: impl Into<String>,
   ) -> Self {
      Self {
         store,
         spreadsheet_id: spreadsheet_id.into(),
         sheet_name: sheet_name.into(),
      }
   }

   /// 参加者表全体の範囲（A:D）
   fn table_range(&self) -> A1Range {
      A1Range::columns(&self.sheet_name, NAME_COLUMN, SCANNED_AT_COLUMN)
   }

   /// 受付結果を書き込む範囲（C{n}:D{n}）
   fn check_in_range(&self, index: RowIndex) -> A1Range {
      A1Range::row_span(
         &self.sheet_name,
         index.sheet_row(),
         STATUS_COLUMN,
         SCANNED_AT_COLUMN,
      )
   }
}

#[async_trait]
impl AttendeeRepository for SheetsAttendeeRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(sheet = %self.sheet_name))]
   async fn load_table(&self) -> Result<AttendeeTable, InfraError> {
      let rows = self
         .store
         .read_range(&self.spreadsheet_id, &self.table_range())
         .await?;
      tracing::debug!(rows = rows.len(), "参加者表を読み込みました");

      Ok(AttendeeTable::new(rows))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(sheet = %self.sheet_name, row = index.sheet_row()))]
   async fn mark_checked_in(&self, index: RowIndex, scanned_at: &str) -> Result<(), InfraError> {
      let values = vec![vec![
         CheckInStatus::Scanned.as_str().to_string(),
         scanned_at.to_string(),
      ]];

      self
         .store
         .write_range(&self.spreadsheet_id, &self.check_in_range(index), values)
         .await
   }
}
