//! # Gate Pass インフラ層
//!
//! 参加者表を保持するスプレッドシート（Google Sheets）との通信を担当する。
//!
//! ## 責務
//!
//! - **ストア抽象**: 範囲の読み書きだけを公開する [`SheetStore`] トレイト
//! - **Sheets API クライアント**: Sheets API v4 を呼び出す [`GoogleSheetsClient`]
//! - **認証**: サービスアカウント鍵によるアクセストークン取得
//! - **リポジトリ**: 参加者表の読み込みと受付結果の書き込み
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`auth`] - サービスアカウント認証とトークンキャッシュ
//! - [`error`] - インフラ層エラー定義
//! - [`range`] - A1 表記の範囲指定
//! - [`repository`] - 参加者リポジトリ
//! - [`sheets`] - ストアトレイトと Sheets API クライアント
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use std::{sync::Arc, time::Duration};
//!
//! use gatepass_infra::{
//!    auth::{ServiceAccountKey, ServiceAccountTokenProvider},
//!    repository::SheetsAttendeeRepository,
//!    sheets::GoogleSheetsClient,
//! };
//!
//! let key = ServiceAccountKey::from_file("credentials.json")?;
//! let tokens = ServiceAccountTokenProvider::new(key, Duration::from_secs(10))?;
//! let client = GoogleSheetsClient::new(Arc::new(tokens), Duration::from_secs(10))?;
//! let repo = SheetsAttendeeRepository::new(Arc::new(client), "spreadsheet-id", "Sheet1");
//! ```

pub mod auth;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod range;
pub mod repository;
pub mod sheets;

pub use error::{InfraError, InfraErrorKind};
pub use range::A1Range;
pub use repository::{AttendeeRepository, SheetsAttendeeRepository};
pub use sheets::{GoogleSheetsClient, SheetStore};
