//! # チェックインユースケース
//!
//! 参加者検索・受付・集計のビジネスロジックを実装する。
//!
//! どの操作もリクエストごとに参加者表を読み直す。表のキャッシュは持たない。
//!
//! ## チェックインの流れ
//!
//! 1. 登録番号を正規化し、表を読み込んで最初に一致する行を探す
//! 2. 受付済みなら 409（前回の受付時刻を返す）
//! 3. 現在時刻を IST で整形する
//! 4. （`recheck_before_write` 有効時）表を読み直し、同じ参加者がまだ未受付か確認する
//! 5. 対象行の C 列・D 列に `Scanned` と受付時刻を書き込む

use std::sync::Arc;

use gatepass_domain::{
   attendee::{AttendeeRecord, RegistrationQuery},
   clock::{Clock, format_scanned_at},
   table::{AttendeeTable, CheckInStats, RowMatch},
};
use gatepass_infra::AttendeeRepository;

use crate::error::{ApiError, Operation};

/// 受付済みで時刻が記録されていない場合の表示
const UNKNOWN_SCANNED_AT: &str = "Unknown";

/// チェックイン成功時の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInOutcome {
   pub name:            String,
   pub registration_no: String,
   pub scanned_at:      String,
}

/// チェックインユースケース実装
pub struct CheckInUseCaseImpl {
   repo:                 Arc<dyn AttendeeRepository>,
   clock:                Arc<dyn Clock>,
   recheck_before_write: bool,
}

impl CheckInUseCaseImpl {
   pub fn new(repo: Arc<dyn AttendeeRepository>, clock: Arc<dyn Clock>) -> Self {
      Self {
         repo,
         clock,
         recheck_before_write: false,
      }
   }

   /// 書き込み直前の再確認を有効にする
   pub fn with_recheck(mut self, enabled: bool) -> Self {
      self.recheck_before_write = enabled;
      self
   }

   /// 登録番号で参加者を検索する
   #[tracing::instrument(skip_all, level = "debug")]
   pub async fn search(&self, raw: Option<&str>) -> Result<AttendeeRecord, ApiError> {
      let query = RegistrationQuery::parse(raw.unwrap_or_default())?;

      let table = self.load(Operation::Search).await?;
      let found = find(&table, &query)?;

      tracing::debug!(row = found.index.sheet_row(), "参加者が見つかりました");
      Ok(found.record)
   }

   /// 参加者を受付済みにする
   #[tracing::instrument(skip_all, level = "debug")]
   pub async fn check_in(&self, raw: Option<&str>) -> Result<CheckInOutcome, ApiError> {
      let query = RegistrationQuery::parse(raw.unwrap_or_default())?;

      let table = self.load(Operation::CheckIn).await?;
      let mut found = find(&table, &query)?;
      ensure_not_checked_in(&found)?;

      let scanned_at = format_scanned_at(self.clock.now());

      if self.recheck_before_write {
         // 読み込みから書き込みまでの間に他の端末が受付した可能性がある
         let fresh = self.load(Operation::CheckIn).await?;
         found = find(&fresh, &query)?;
         ensure_not_checked_in(&found)?;
      }

      self
         .repo
         .mark_checked_in(found.index, &scanned_at)
         .await
         .map_err(ApiError::upstream(Operation::CheckIn))?;

      tracing::info!(
         registration_no = %found.record.registration_no,
         row = found.index.sheet_row(),
         %scanned_at,
         "チェックインしました"
      );

      Ok(CheckInOutcome {
         name: found.record.name,
         registration_no: found.record.registration_no,
         scanned_at,
      })
   }

   /// 受付状況を集計する
   #[tracing::instrument(skip_all, level = "debug")]
   pub async fn stats(&self) -> Result<CheckInStats, ApiError> {
      let table = self.load(Operation::Stats).await?;
      Ok(table.stats())
   }

   async fn load(&self, operation: Operation) -> Result<AttendeeTable, ApiError> {
      self
         .repo
         .load_table()
         .await
         .map_err(ApiError::upstream(operation))
   }
}

fn find(table: &AttendeeTable, query: &RegistrationQuery) -> Result<RowMatch, ApiError> {
   table
      .find_by_registration_no(query)
      .ok_or(ApiError::NotFound)
}

fn ensure_not_checked_in(found: &RowMatch) -> Result<(), ApiError> {
   if !found.record.is_checked_in() {
      return Ok(());
   }

   Err(ApiError::AlreadyCheckedIn {
      name:            found.record.name.clone(),
      registration_no: found.record.registration_no.clone(),
      scanned_at:      found
         .record
         .scanned_at
         .clone()
         .unwrap_or_else(|| UNKNOWN_SCANNED_AT.to_string()),
   })
}
