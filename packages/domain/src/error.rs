//! # ドメイン層エラー定義
//!
//! 受付ルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 登録番号が未指定・空 |
//!
//! 「見つからない」「受付済み」は検索結果から API 層が判断するため、ここには含めない。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// 入力値が受付ルールに違反している場合に使用する。
   #[error("バリデーションエラー: {0}")]
   Validation(String),
}
