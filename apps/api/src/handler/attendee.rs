//! # 参加者 API ハンドラ
//!
//! 受付端末から呼ばれる検索・チェックインのエンドポイントを実装する。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 入力 |
//! |----------|------|------|
//! | GET | `/api/search` | クエリ `regNo` |
//! | POST | `/api/checkin` | JSON ボディ `{ "regNo": ... }` |

use std::sync::Arc;

use axum::{
   Json,
   extract::{
      Query,
      State,
      rejection::{JsonRejection, QueryRejection},
   },
};
use gatepass_domain::attendee::{AttendeeRecord, CheckInStatus};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::{error::ApiError, usecase::CheckInOutcome};

/// 検索クエリ
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
   #[serde(rename = "regNo")]
   pub reg_no: Option<String>,
}

/// 登録番号の値
///
/// バーコードリーダー経由のクライアントは数値のまま送ってくることがあるため、
/// 文字列と数値の両方を受け付ける。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RegNoValue {
   Text(String),
   Number(serde_json::Number),
}

impl RegNoValue {
   fn into_string(self) -> String {
      match self {
         Self::Text(s) => s,
         Self::Number(n) => n.to_string(),
      }
   }
}

/// チェックインリクエスト
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
   #[serde(rename = "regNo")]
   pub reg_no: Option<RegNoValue>,
}

/// 参加者 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeDto {
   pub name:            String,
   pub registration_no: String,
   pub status:          CheckInStatus,
   pub scanned_at:      Option<String>,
}

impl From<AttendeeRecord> for AttendeeDto {
   fn from(record: AttendeeRecord) -> Self {
      Self {
         name:            record.name,
         registration_no: record.registration_no,
         status:          record.status,
         scanned_at:      record.scanned_at,
      }
   }
}

/// チェックイン成功レスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
   pub success:         bool,
   pub message:         &'static str,
   pub name:            String,
   pub registration_no: String,
   pub status:          CheckInStatus,
   pub scanned_at:      String,
}

impl From<CheckInOutcome> for CheckInResponse {
   fn from(outcome: CheckInOutcome) -> Self {
      Self {
         success:         true,
         message:         "Check-in successful!",
         name:            outcome.name,
         registration_no: outcome.registration_no,
         status:          CheckInStatus::Scanned,
         scanned_at:      outcome.scanned_at,
      }
   }
}

/// 登録番号で参加者を検索する
///
/// ## エンドポイント
/// GET /api/search?regNo={regNo}
///
/// クエリ文字列を解釈できない場合（`regNo` の重複など）は登録番号が無いものとして扱う。
#[tracing::instrument(skip_all)]
pub async fn search(
   State(state): State<Arc<AppState>>,
   query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<AttendeeDto>, ApiError> {
   let reg_no = match query {
      Ok(Query(query)) => query.reg_no,
      Err(rejection) => {
         tracing::debug!(error = %rejection, "クエリ文字列を解釈できませんでした");
         None
      }
   };

   let record = state.usecase.search(reg_no.as_deref()).await?;
   Ok(Json(AttendeeDto::from(record)))
}

/// 参加者を受付済みにする
///
/// ## エンドポイント
/// POST /api/checkin
///
/// ボディが JSON として読めない場合は登録番号が無いものとして扱う。
#[tracing::instrument(skip_all)]
pub async fn check_in(
   State(state): State<Arc<AppState>>,
   body: Result<Json<CheckInRequest>, JsonRejection>,
) -> Result<Json<CheckInResponse>, ApiError> {
   let reg_no = match body {
      Ok(Json(request)) => request.reg_no.map(RegNoValue::into_string),
      Err(rejection) => {
         tracing::debug!(error = %rejection, "リクエストボディを解釈できませんでした");
         None
      }
   };

   let outcome = state.usecase.check_in(reg_no.as_deref()).await?;
   Ok(Json(CheckInResponse::from(outcome)))
}
