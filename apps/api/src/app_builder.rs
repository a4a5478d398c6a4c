//! # アプリケーション構築
//!
//! State の組み立てとルーター構築を担当する。
//! `bin/gatepass.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
   Router,
   routing::{get, post},
};
use gatepass_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
   cors::CorsLayer,
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::handler::{AppState, check_in, get_stats, health_check, search};

/// ルーターを構築する
///
/// 受付端末は別オリジンから呼び出すため、CORS はすべて許可する。
pub fn build_app(state: Arc<AppState>) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .route("/api/search", get(search))
      .route("/api/checkin", post(check_in))
      .route("/api/stats", get(get_stats))
      .with_state(state)
      .layer(CorsLayer::permissive())
      // Request ID レイヤー（下に書いたものが外側）
      // 1. SetRequestIdLayer（最外）: UUID v7 を生成（クライアント提供値があればそれを使う）
      // 2. TraceLayer: スパンに request_id を含め、全ログに付与
      // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
