//! # Gate Pass サーバー
//!
//! 受付端末向けチェックイン API のエントリーポイント。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run --bin gatepass
//!
//! # 本番環境（環境変数を直接指定）
//! GOOGLE_SHEET_ID=... LOG_FORMAT=json cargo run --bin gatepass --release
//! ```
//!
//! 環境変数の一覧は [`gatepass_api::config`] を参照。

use std::sync::Arc;

use anyhow::Context as _;
use gatepass_api::{
   app_builder::build_app,
   config::AppConfig,
   handler::AppState,
   usecase::CheckInUseCaseImpl,
};
use gatepass_domain::clock::SystemClock;
use gatepass_infra::{
   GoogleSheetsClient,
   SheetsAttendeeRepository,
   auth::{ServiceAccountKey, ServiceAccountTokenProvider},
};
use gatepass_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. サービスアカウント鍵の読み込みと Sheets クライアントの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
   dotenvy::dotenv().ok();

   let _app_span = init_tracing(TracingConfig::from_env("gatepass")).entered();

   let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

   let key = ServiceAccountKey::from_file(&config.store.credentials_path)
      .context("サービスアカウント鍵の読み込みに失敗しました")?;
   tracing::info!(client_email = %key.client_email, "サービスアカウント鍵を読み込みました");

   let tokens = ServiceAccountTokenProvider::new(key, config.store.timeout)
      .context("アクセストークン発行の準備に失敗しました")?;
   let sheets = GoogleSheetsClient::new(Arc::new(tokens), config.store.timeout)
      .context("Sheets クライアントの構築に失敗しました")?;
   let repository = SheetsAttendeeRepository::new(
      Arc::new(sheets),
      config.store.spreadsheet_id.clone(),
      config.store.sheet_name.clone(),
   );

   let usecase = CheckInUseCaseImpl::new(Arc::new(repository), Arc::new(SystemClock))
      .with_recheck(config.check_in.recheck_before_write);
   let app = build_app(Arc::new(AppState { usecase }));

   let addr = format!("{}:{}", config.server.host, config.server.port);
   let listener = TcpListener::bind(&addr)
      .await
      .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
   tracing::info!(
      %addr,
      sheet = %config.store.sheet_name,
      recheck = config.check_in.recheck_before_write,
      "Gate Pass サーバーが起動しました"
   );

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("サーバーを停止しました");
   Ok(())
}

/// Ctrl+C を待つ
async fn shutdown_signal() {
   if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "シグナルの待ち受けに失敗しました");
   }
}
