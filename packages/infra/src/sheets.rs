//! # スプレッドシートストア
//!
//! 参加者表を保持するリモートの表形式ストアへのアクセスを抽象化する。
//! コアロジックが使う操作は範囲の読み込みと書き込みの 2 つだけ。
//!
//! ## エンドポイント（Sheets API v4）
//!
//! - `GET /v4/spreadsheets/{id}/values/{range}` - 範囲の読み込み
//! - `PUT /v4/spreadsheets/{id}/values/{range}?valueInputOption=RAW` - 範囲の書き込み
//!
//! 書き込みは 1 回の API 呼び出しで完結する。途中まで書かれた状態は残らない
//! （Sheets API 側の保証に委ねる）。

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{auth::AccessTokenProvider, error::InfraError, range::A1Range};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// 表形式ストアのトレイト
///
/// テスト時にインメモリ実装を使用できるようトレイトで定義。
#[async_trait]
pub trait SheetStore: Send + Sync {
   /// 範囲内のセルを行ごとに読み込む
   ///
   /// 末尾の空セル・空行はストアの仕様により省略されることがある。
   async fn read_range(
      &self,
      spreadsheet_id: &str,
      range: &A1Range,
   ) -> Result<Vec<Vec<String>>, InfraError>;

   /// 範囲にセルの値を書き込む
   async fn write_range(
      &self,
      spreadsheet_id: &str,
      range: &A1Range,
      values: Vec<Vec<String>>,
   ) -> Result<(), InfraError>;
}

/// `values.get` のレスポンス
///
/// 範囲が空の場合 `values` フィールド自体が省略される。
#[derive(Debug, Deserialize)]
struct ValueRange {
   #[serde(default)]
   values: Vec<Vec<serde_json::Value>>,
}

/// `values.update` のリクエストボディ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesRequest<'a> {
   range:           String,
   major_dimension: &'static str,
   values:          &'a [Vec<String>],
}

/// セル値を文字列に変換する
///
/// `FORMATTED_VALUE` で読むため通常は文字列だが、数値や真偽値が来ても文字列として扱う。
fn cell_to_string(value: serde_json::Value) -> String {
   match value {
      serde_json::Value::String(s) => s,
      serde_json::Value::Null => String::new(),
      other => other.to_string(),
   }
}

/// Google Sheets API クライアント
#[derive(Clone)]
pub struct GoogleSheetsClient {
   base_url: String,
   client:   reqwest::Client,
   tokens:   Arc<dyn AccessTokenProvider>,
}

impl GoogleSheetsClient {
   /// 新しいクライアントを作成する
   ///
   /// # 引数
   ///
   /// - `tokens`: アクセストークンの提供元
   /// - `timeout`: 1 回の API 呼び出しの上限時間。超過すると `InfraErrorKind::Timeout`
   pub fn new(tokens: Arc<dyn AccessTokenProvider>, timeout: Duration) -> Result<Self, InfraError> {
      let client = reqwest::Client::builder().timeout(timeout).build()?;
      Ok(Self {
         base_url: DEFAULT_BASE_URL.to_string(),
         client,
         tokens,
      })
   }

   /// 接続先のベース URL を差し替える（エミュレータ・プロキシ向け）
   pub fn with_base_url(mut self, base_url: &str) -> Self {
      self.base_url = base_url.trim_end_matches('/').to_string();
      self
   }

   fn values_url(&self, spreadsheet_id: &str, range: &A1Range) -> String {
      format!(
         "{}/v4/spreadsheets/{}/values/{}",
         self.base_url,
         urlencoding::encode(spreadsheet_id),
         urlencoding::encode(&range.to_string())
      )
   }

   /// 2xx 以外のレスポンスを `InfraError` に変換する
   async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, InfraError> {
      let status = response.status();
      if status.is_success() {
         return Ok(response);
      }

      let body = response.text().await.unwrap_or_default();
      Err(InfraError::status(status.as_u16(), body))
   }
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
   #[tracing::instrument(skip_all, level = "debug", fields(%range))]
   async fn read_range(
      &self,
      spreadsheet_id: &str,
      range: &A1Range,
   ) -> Result<Vec<Vec<String>>, InfraError> {
      let token = self.tokens.access_token().await?;

      let response = self
         .client
         .get(self.values_url(spreadsheet_id, range))
         .bearer_auth(token)
         .send()
         .await?;
      let body = Self::ensure_success(response).await?.json::<ValueRange>().await?;

      Ok(body
         .values
         .into_iter()
         .map(|row| row.into_iter().map(cell_to_string).collect())
         .collect())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%range))]
   async fn write_range(
      &self,
      spreadsheet_id: &str,
      range: &A1Range,
      values: Vec<Vec<String>>,
   ) -> Result<(), InfraError> {
      let token = self.tokens.access_token().await?;

      let request = UpdateValuesRequest {
         range:           range.to_string(),
         major_dimension: "ROWS",
         values:          &values,
      };

      let response = self
         .client
         .put(self.values_url(spreadsheet_id, range))
         .query(&[("valueInputOption", "RAW")])
         .bearer_auth(token)
         .json(&request)
         .send()
         .await?;
      Self::ensure_success(response).await?;

      Ok(())
   }
}
