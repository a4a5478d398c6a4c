//! # 受付状況ハンドラ

use std::sync::Arc;

use axum::{Json, extract::State};
use gatepass_domain::table::CheckInStats;

use super::AppState;
use crate::error::ApiError;

/// 受付状況を集計する
///
/// ## エンドポイント
/// GET /api/stats
///
/// ```json
/// { "total": 2, "scanned": 1, "remaining": 1 }
/// ```
#[tracing::instrument(skip_all)]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<CheckInStats>, ApiError> {
   let stats = state.usecase.stats().await?;
   Ok(Json(stats))
}
