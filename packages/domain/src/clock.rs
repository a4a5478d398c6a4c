//! # Clock（時刻プロバイダ）
//!
//! ユースケース層での `Utc::now()` 直接呼び出しを置き換え、
//! テストで固定時刻を注入可能にするための抽象化。
//!
//! 受付時刻はインド標準時（IST, UTC+05:30）で `en-IN` ロケール相当の
//! 人間可読な形式（例: `18/10/2026, 1:05:03 pm`）に整形してシートに書き込む。

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// IST の UTC からのオフセット（秒）
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}

/// 受付時刻を IST の `d/m/yyyy, h:mm:ss am` 形式に整形する
pub fn format_scanned_at(at: DateTime<Utc>) -> String {
   // IST_OFFSET_SECS は ±24 時間の範囲内なので常に Some
   let ist = FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
   at.with_timezone(&ist)
      .format("%-d/%-m/%Y, %-I:%M:%S %P")
      .to_string()
}
