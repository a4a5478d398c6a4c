//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。開発環境では `.env` ファイルを
//! `dotenvy` で読み込んでから [`AppConfig::from_env`] を呼ぶ。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `PORT` | No | `5000` | ポート番号 |
//! | `GOOGLE_SHEET_ID` | **Yes** | - | 参加者表のスプレッドシート ID |
//! | `SHEET_NAME` | No | `Sheet1` | シート（タブ）名 |
//! | `GOOGLE_APPLICATION_CREDENTIALS` | No | `credentials.json` | サービスアカウント鍵のパス |
//! | `STORE_TIMEOUT_SECS` | No | `10` | Sheets API 呼び出しのタイムアウト（秒） |
//! | `CHECKIN_RECHECK` | No | `false` | 書き込み直前に受付状態を再確認する |

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 必須の環境変数が未設定
   #[error("環境変数 {0} が設定されていません")]
   Missing(&'static str),

   /// 値の形式が不正
   #[error("環境変数 {name} の値が不正です: {value:?}")]
   Invalid { name: &'static str, value: String },
}

/// HTTP サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
   /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
   pub host: String,
   /// ポート番号
   pub port: u16,
}

/// スプレッドシート接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
   /// スプレッドシート ID
   pub spreadsheet_id:   String,
   /// シート名
   pub sheet_name:       String,
   /// サービスアカウント鍵のパス
   pub credentials_path: PathBuf,
   /// 1 回の API 呼び出しの上限時間
   pub timeout:          Duration,
}

/// チェックイン動作の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckInConfig {
   /// 書き込み直前に表を読み直し、受付済みになっていれば 409 を返す
   pub recheck_before_write: bool,
}

/// アプリケーション全体の設定
///
/// アプリケーション起動時に一度だけ構築し、各コンポーネントに渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
   pub server:   ServerConfig,
   pub store:    StoreConfig,
   pub check_in: CheckInConfig,
}

impl AppConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// プロセスの環境変数を書き換えずにテストできるよう、取得元を差し替え可能にしている。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

      let spreadsheet_id = lookup("GOOGLE_SHEET_ID")
         .filter(|v| !v.trim().is_empty())
         .ok_or(ConfigError::Missing("GOOGLE_SHEET_ID"))?;

      Ok(Self {
         server:   ServerConfig {
            host: var("HOST", "0.0.0.0"),
            port: parse_var("PORT", var("PORT", "5000"))?,
         },
         store:    StoreConfig {
            spreadsheet_id,
            sheet_name: var("SHEET_NAME", "Sheet1"),
            credentials_path: PathBuf::from(var(
               "GOOGLE_APPLICATION_CREDENTIALS",
               "credentials.json",
            )),
            timeout: Duration::from_secs(parse_var(
               "STORE_TIMEOUT_SECS",
               var("STORE_TIMEOUT_SECS", "10"),
            )?),
         },
         check_in: CheckInConfig {
            recheck_before_write: parse_bool("CHECKIN_RECHECK", var("CHECKIN_RECHECK", "false"))?,
         },
      })
   }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
   value
      .trim()
      .parse()
      .map_err(|_| ConfigError::Invalid { name, value })
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
   match value.trim().to_lowercase().as_str() {
      "1" | "true" | "yes" | "on" => Ok(true),
      "0" | "false" | "no" | "off" | "" => Ok(false),
      _ => Err(ConfigError::Invalid { name, value }),
   }
}
