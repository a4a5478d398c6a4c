//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs           # 親モジュール（re-export、共有 State）
//! └── handler/
//!     ├── attendee.rs  # 検索・チェックイン
//!     ├── health.rs    # ヘルスチェック
//!     └── stats.rs     # 受付状況の集計
//! ```

pub mod attendee;
pub mod health;
pub mod stats;

pub use attendee::{check_in, search};
pub use health::health_check;
pub use stats::get_stats;

use crate::usecase::CheckInUseCaseImpl;

/// ハンドラ共通の State
pub struct AppState {
   pub usecase: CheckInUseCaseImpl,
}
