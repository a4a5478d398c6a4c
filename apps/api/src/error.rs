//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## エラーと HTTP ステータスの対応
//!
//! | ApiError | HTTP Status | 再試行 |
//! |----------|-------------|--------|
//! | `Validation` | 400 | 不可 |
//! | `NotFound` | 404 | 不可 |
//! | `AlreadyCheckedIn` | 409 | 不可（受付済みという確定した結果） |
//! | `Upstream` | 500 | クライアント側で再試行可 |
//!
//! ## レスポンス形式
//!
//! フロントエンド（受付端末）との互換性のため、`error` フィールドを持つ JSON を返す。
//!
//! ```json
//! { "error": "Registration not found" }
//! ```
//!
//! 409 の場合は受付済みの参加者情報も含める:
//!
//! ```json
//! {
//!   "error": "Already checked in",
//!   "name": "Bob",
//!   "registrationNo": "REG 002",
//!   "scannedAt": "1/1/25, 10:00:00 am"
//! }
//! ```

use std::fmt;

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use gatepass_domain::DomainError;
use gatepass_infra::InfraError;
use serde::Serialize;
use thiserror::Error;

/// ストアにアクセスしていた操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
   Search,
   CheckIn,
   Stats,
}

impl fmt::Display for Operation {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(match self {
         Self::Search => "search",
         Self::CheckIn => "check in",
         Self::Stats => "get stats",
      })
   }
}

/// API 層で発生するエラー
///
/// ハンドラ・ユースケースから返されるエラー型。`IntoResponse` を実装しているため、
/// axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
   /// バリデーションエラー（400 Bad Request）
   #[error("{0}")]
   Validation(String),

   /// 登録番号に一致する参加者がいない（404 Not Found）
   #[error("Registration not found")]
   NotFound,

   /// 受付済み（409 Conflict）
   #[error("Already checked in")]
   AlreadyCheckedIn {
      name:            String,
      registration_no: String,
      /// 前回の受付時刻（不明な場合は `"Unknown"`）
      scanned_at:      String,
   },

   /// ストアの読み書きに失敗（500 Internal Server Error）
   #[error("Failed to {operation}: {source}")]
   Upstream {
      operation: Operation,
      #[source]
      source:    InfraError,
   },
}

impl ApiError {
   /// ストアのエラーを操作名付きでラップする
   pub fn upstream(operation: Operation) -> impl FnOnce(InfraError) -> Self {
      move |source| Self::Upstream { operation, source }
   }

   pub fn status_code(&self) -> StatusCode {
      match self {
         Self::Validation(_) => StatusCode::BAD_REQUEST,
         Self::NotFound => StatusCode::NOT_FOUND,
         Self::AlreadyCheckedIn { .. } => StatusCode::CONFLICT,
         Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }
}

impl From<DomainError> for ApiError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => Self::Validation(msg),
      }
   }
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
   pub error: String,
}

/// 受付済みエラーのレスポンス
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlreadyCheckedInResponse {
   pub error:           String,
   pub name:            String,
   pub registration_no: String,
   pub scanned_at:      String,
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let status = self.status_code();
      let message = self.to_string();

      match self {
         Self::AlreadyCheckedIn {
            name,
            registration_no,
            scanned_at,
         } => {
            tracing::info!(%registration_no, %scanned_at, "受付済みのためチェックインを拒否しました");
            (
               status,
               Json(AlreadyCheckedInResponse {
                  error: message,
                  name,
                  registration_no,
                  scanned_at,
               }),
            )
               .into_response()
         }
         Self::Upstream { operation, source } => {
            // ストアのエラーは呼び出し経路（SpanTrace）付きでログに残す
            tracing::error!(
               %operation,
               error = %source,
               retryable = source.is_retryable(),
               span_trace = %source.span_trace(),
               "ストアへのアクセスに失敗しました"
            );
            (status, Json(ErrorResponse { error: message })).into_response()
         }
         Self::Validation(_) | Self::NotFound => {
            tracing::info!(status = status.as_u16(), "{message}");
            (status, Json(ErrorResponse { error: message })).into_response()
         }
      }
   }
}
