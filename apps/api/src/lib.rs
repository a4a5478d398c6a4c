//! # Gate Pass API サーバー
//!
//! イベント会場の受付端末向けチェックイン API。
//! 参加者表は Google スプレッドシートに置き、リクエストごとに読み書きする。
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  受付端末    │────▶│ gatepass API │────▶│  Google Sheets   │
//! │ (ブラウザ)   │     │  port: 5000  │     │  (参加者表 A:D)  │
//! └──────────────┘     └──────────────┘     └──────────────────┘
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーターとミドルウェアの構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - 検索・チェックイン・集計のビジネスロジック
//!
//! ## 依存関係
//!
//! - `gatepass_domain`: 参加者レコード、正規化、集計
//! - `gatepass_infra`: Sheets API クライアント、リポジトリ
//! - `gatepass_shared`: トレーシング初期化、ヘルスチェック型

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
