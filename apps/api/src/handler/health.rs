//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! スプレッドシートには接続せず、プロセスが応答できることだけを返す。

use axum::Json;
use gatepass_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// 常に 200 OK を返す。
///
/// ```text
/// $ curl http://localhost:5000/health
/// {"status":"healthy","version":"0.1.0"}
/// ```
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
