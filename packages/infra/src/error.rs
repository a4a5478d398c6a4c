//! # インフラ層エラー定義
//!
//! スプレッドシートやトークンエンドポイントとの通信で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Http, Timeout, Status 等）
//!
//! `From` 実装や convenience constructor でエラーを生成すると、
//! その時点のスパン情報（呼び出し経路）が自動的にキャプチャされる。
//! API 層はこの SpanTrace をエラーログに出力する。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// HTTP 通信エラー
   ///
   /// 接続失敗、TLS エラーなど。
   #[error("HTTP request failed: {0}")]
   Http(#[source] reqwest::Error),

   /// タイムアウト
   ///
   /// ストア呼び出しが設定時間内に完了しなかった。
   #[error("timed out: {0}")]
   Timeout(String),

   /// 2xx 以外のステータス
   ///
   /// Sheets API またはトークンエンドポイントがエラーを返した（権限不足、クォータ超過など）。
   #[error("unexpected status {status}: {body}")]
   Status {
      /// HTTP ステータスコード
      status: u16,
      /// レスポンスボディ
      body:   String,
   },

   /// 認証エラー
   ///
   /// JWT の署名失敗など、アクセストークンを得られなかった。
   #[error("authentication failed: {0}")]
   Auth(String),

   /// 認証情報ファイルの読み込みエラー
   #[error("cannot read credentials: {0}")]
   Credentials(String),

   /// シリアライズ/デシリアライズエラー
   #[error("serialization error: {0}")]
   Serialization(#[source] serde_json::Error),

   /// 予期しないエラー
   #[error("unexpected error: {0}")]
   Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
   fn new(kind: InfraErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   /// エラー種別を取得する
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   /// SpanTrace を取得する
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   /// クライアントが再試行して成功し得るエラーか
   ///
   /// 通信エラー・タイムアウト・429・5xx は一時的な障害とみなす。
   pub fn is_retryable(&self) -> bool {
      match &self.kind {
         InfraErrorKind::Http(_) | InfraErrorKind::Timeout(_) => true,
         InfraErrorKind::Status { status, .. } => *status == 429 || *status >= 500,
         _ => false,
      }
   }

   // ===== Convenience constructors =====

   /// ステータスエラーを生成する
   pub fn status(status: u16, body: impl Into<String>) -> Self {
      Self::new(InfraErrorKind::Status {
         status,
         body: body.into(),
      })
   }

   /// タイムアウトエラーを生成する
   pub fn timeout(msg: impl Into<String>) -> Self {
      Self::new(InfraErrorKind::Timeout(msg.into()))
   }

   /// 認証情報ファイルの読み込みエラーを生成する
   pub fn credentials(msg: impl Into<String>) -> Self {
      Self::new(InfraErrorKind::Credentials(msg.into()))
   }

   /// 予期しないエラーを生成する
   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self::new(InfraErrorKind::Unexpected(msg.into()))
   }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<reqwest::Error> for InfraError {
   fn from(source: reqwest::Error) -> Self {
      if source.is_timeout() {
         Self::new(InfraErrorKind::Timeout(source.to_string()))
      } else {
         Self::new(InfraErrorKind::Http(source))
      }
   }
}

impl From<serde_json::Error> for InfraError {
   fn from(source: serde_json::Error) -> Self {
      Self::new(InfraErrorKind::Serialization(source))
   }
}

impl From<jsonwebtoken::errors::Error> for InfraError {
   fn from(source: jsonwebtoken::errors::Error) -> Self {
      Self::new(InfraErrorKind::Auth(source.to_string()))
   }
}
