//! # ヘルスチェック共通型

use serde::Serialize;

/// ヘルスチェックレスポンス
///
/// `status` はサービスの稼働状態、`version` は Cargo.toml のバージョンを示す。
///
/// ## 使用例
///
/// ```
/// use gatepass_shared::HealthResponse;
///
/// let response = HealthResponse::healthy("0.1.0");
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Serialize)]
pub struct HealthResponse {
   /// 稼働状態（`"healthy"` または `"unhealthy"`）
   pub status:  String,
   /// アプリケーションバージョン（Cargo.toml から取得）
   pub version: String,
}

impl HealthResponse {
   pub fn healthy(version: impl Into<String>) -> Self {
      Self {
         status:  "healthy".to_string(),
         version: version.into(),
      }
   }
}
