//! # Gate Pass 共有ユーティリティ
//!
//! ビジネスロジックを含まない横断的なユーティリティを提供する。
//!
//! - [`observability`] - トレーシング初期化、ログ形式、Request ID
//! - [`health`] - ヘルスチェックのレスポンス型

pub mod health;
pub mod observability;

pub use health::HealthResponse;
