//! # チェックイン API の統合テスト
//!
//! ルーター全体（ミドルウェア込み）を `oneshot` で駆動し、
//! インメモリの参加者表に対する検索・チェックイン・集計を検証する。

use std::sync::Arc;

use axum::{Router, body::Body};
use chrono::{TimeZone, Utc};
use gatepass_api::{app_builder::build_app, handler::AppState, usecase::CheckInUseCaseImpl};
use gatepass_domain::clock::FixedClock;
use gatepass_infra::{
   SheetsAttendeeRepository,
   mock::{InMemorySheetStore, StoreFailure},
};
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tower::ServiceExt;

const SPREADSHEET_ID: &str = "test-spreadsheet";

// ===== テストヘルパー =====

#[fixture]
fn store() -> InMemorySheetStore {
   InMemorySheetStore::with_rows(&[
      &["Name", "RegNo", "Status", "ScannedAt"],
      &["Alice", "REG-001", "", ""],
      &["Bob", "REG 002", "Scanned", "1/1/25, 10:00:00 am"],
   ])
}

fn app_with(store: &InMemorySheetStore, recheck: bool) -> Router {
   let repository =
      SheetsAttendeeRepository::new(Arc::new(store.clone()), SPREADSHEET_ID, "Sheet1");
   // 2026-10-18 07:35:03 UTC = 13:05:03 IST
   let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 7, 35, 3).unwrap());
   let usecase =
      CheckInUseCaseImpl::new(Arc::new(repository), Arc::new(clock)).with_recheck(recheck);

   build_app(Arc::new(AppState { usecase }))
}

fn app(store: &InMemorySheetStore) -> Router {
   app_with(store, false)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
   let response = app.oneshot(request).await.unwrap();
   let status = response.status();
   let body = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   (status, serde_json::from_slice(&body).unwrap())
}

fn get(uri: &str) -> Request<Body> {
   Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
   Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
}

// ===== GET /api/search =====

#[rstest]
#[tokio::test]
async fn test_検索は表記揺れを吸収して参加者を返す(store: InMemorySheetStore) {
   let (status, body) = send(app(&store), get("/api/search?regNo=reg001")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(
      body,
      json!({
         "name": "Alice",
         "registrationNo": "REG-001",
         "status": "Not Scanned",
         "scannedAt": null
      })
   );
   assert_eq!(store.read_ranges(), vec!["Sheet1!A:D".to_string()]);
}

#[rstest]
#[tokio::test]
async fn test_検索は受付済みの参加者の受付時刻を返す(store: InMemorySheetStore) {
   let (status, body) = send(app(&store), get("/api/search?regNo=reg%20002")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["status"], "Scanned");
   assert_eq!(body["scannedAt"], "1/1/25, 10:00:00 am");
}

#[rstest]
#[case("/api/search")]
#[case("/api/search?regNo=")]
#[case("/api/search?regNo=%20%20")]
#[case("/api/search?regNo=-")]
#[tokio::test]
async fn test_検索は登録番号が無ければ400(store: InMemorySheetStore, #[case] uri: &str) {
   let (status, body) = send(app(&store), get(uri)).await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(body, json!({"error": "Registration number is required"}));
   assert!(store.read_ranges().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_検索は解釈できないクエリもjsonの400で返す(store: InMemorySheetStore) {
   let response = app(&store)
      .oneshot(get("/api/search?regNo=REG-001&regNo=REG-002"))
      .await
      .unwrap();

   assert_eq!(response.status(), StatusCode::BAD_REQUEST);
   assert_eq!(
      response.headers().get(header::CONTENT_TYPE).unwrap(),
      "application/json"
   );
   let body = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   assert_eq!(
      serde_json::from_slice::<Value>(&body).unwrap(),
      json!({"error": "Registration number is required"})
   );
   assert!(store.read_ranges().is_empty());
}

#[rstest]
#[case("Pending")]
#[case("")]
#[case("checked")]
#[tokio::test]
async fn test_検索はscanned以外の受付状態をnot_scannedとして返す(#[case] cell: &str) {
   let store = InMemorySheetStore::with_rows(&[
      &["Name", "RegNo", "Status", "ScannedAt"],
      &["Carol", "REG-003", cell],
   ]);

   let (status, body) = send(app(&store), get("/api/search?regNo=REG-003")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["status"], "Not Scanned");
}

#[rstest]
#[tokio::test]
async fn test_検索は見つからなければ404(store: InMemorySheetStore) {
   let (status, body) = send(app(&store), get("/api/search?regNo=XYZ-999")).await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(body, json!({"error": "Registration not found"}));
}

#[rstest]
#[tokio::test]
async fn test_検索はストアの失敗で500(store: InMemorySheetStore) {
   store.fail_with(StoreFailure::Status(503, "UNAVAILABLE".to_string()));

   let (status, body) = send(app(&store), get("/api/search?regNo=REG-001")).await;

   assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
   let message = body["error"].as_str().unwrap();
   assert!(message.starts_with("Failed to search: "), "{message}");
}

// ===== POST /api/checkin =====

#[rstest]
#[tokio::test]
async fn test_チェックインは対象行のcとdに書き込む(store: InMemorySheetStore) {
   let (status, body) = send(
      app(&store),
      post_json("/api/checkin", json!({"regNo": "reg-001"})),
   )
   .await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(
      body,
      json!({
         "success": true,
         "message": "Check-in successful!",
         "name": "Alice",
         "registrationNo": "REG-001",
         "status": "Scanned",
         "scannedAt": "18/10/2026, 1:05:03 pm"
      })
   );

   let writes = store.writes();
   assert_eq!(writes.len(), 1);
   assert_eq!(writes[0].spreadsheet_id, SPREADSHEET_ID);
   assert_eq!(writes[0].range, "Sheet1!C2:D2");
   assert_eq!(
      writes[0].values,
      vec![vec![
         "Scanned".to_string(),
         "18/10/2026, 1:05:03 pm".to_string()
      ]]
   );
}

#[rstest]
#[tokio::test]
async fn test_チェックイン後は集計の受付済みが1増える(store: InMemorySheetStore) {
   let (_, before) = send(app(&store), get("/api/stats")).await;

   let (status, _) = send(
      app(&store),
      post_json("/api/checkin", json!({"regNo": "REG-001"})),
   )
   .await;
   assert_eq!(status, StatusCode::OK);

   let (_, after) = send(app(&store), get("/api/stats")).await;
   assert_eq!(before, json!({"total": 2, "scanned": 1, "remaining": 1}));
   assert_eq!(after, json!({"total": 2, "scanned": 2, "remaining": 0}));
}

#[rstest]
#[tokio::test]
async fn test_受付済みへのチェックインは409で前回の時刻を返す(store: InMemorySheetStore) {
   let (status, body) = send(
      app(&store),
      post_json("/api/checkin", json!({"regNo": "reg-002"})),
   )
   .await;

   assert_eq!(status, StatusCode::CONFLICT);
   assert_eq!(
      body,
      json!({
         "error": "Already checked in",
         "name": "Bob",
         "registrationNo": "REG 002",
         "scannedAt": "1/1/25, 10:00:00 am"
      })
   );
   assert!(store.writes().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_同じ参加者への2回目のチェックインは409(store: InMemorySheetStore) {
   let first = send(
      app(&store),
      post_json("/api/checkin", json!({"regNo": "REG-001"})),
   )
   .await;
   let second = send(
      app(&store),
      post_json("/api/checkin", json!({"regNo": "REG-001"})),
   )
   .await;

   assert_eq!(first.0, StatusCode::OK);
   assert_eq!(second.0, StatusCode::CONFLICT);
   assert_eq!(second.1["scannedAt"], "18/10/2026, 1:05:03 pm");
   assert_eq!(store.writes().len(), 1);
}

#[rstest]
#[case(json!({}))]
#[case(json!({"regNo": ""}))]
#[case(json!({"regNo": "   "}))]
#[case(json!({"regNo": null}))]
#[tokio::test]
async fn test_チェックインは登録番号が無ければ400(
   store: InMemorySheetStore,
   #[case] request: Value,
) {
   let (status, body) = send(app(&store), post_json("/api/checkin", request)).await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(body, json!({"error": "Registration number is required"}));
   assert!(store.writes().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_チェックインは不正なjsonを400で返す(store: InMemorySheetStore) {
   let request = Request::builder()
      .method("POST")
      .uri("/api/checkin")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();

   let (status, body) = send(app(&store), request).await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(body, json!({"error": "Registration number is required"}));
}

#[rstest]
#[tokio::test]
async fn test_チェックインは数値の登録番号を受け付ける() {
   let store = InMemorySheetStore::with_rows(&[
      &["Name", "RegNo", "Status", "ScannedAt"],
      &["Dave", "1001"],
   ]);

   let (status, body) = send(
      app(&store),
      post_json("/api/checkin", json!({"regNo": 1001})),
   )
   .await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["name"], "Dave");
}

#[rstest]
#[tokio::test]
async fn test_チェックインは見つからなければ404(store: InMemorySheetStore) {
   let (status, body) = send(
      app(&store),
      post_json("/api/checkin", json!({"regNo": "XYZ-999"})),
   )
   .await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(body, json!({"error": "Registration not found"}));
}

#[rstest]
#[tokio::test]
async fn test_チェックインはタイムアウトで500(store: InMemorySheetStore) {
   store.fail_with(StoreFailure::Timeout);

   let (status, body) = send(
      app(&store),
      post_json("/api/checkin", json!({"regNo": "REG-001"})),
   )
   .await;

   assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
   let message = body["error"].as_str().unwrap();
   assert!(message.starts_with("Failed to check in: "), "{message}");
}

#[rstest]
#[tokio::test]
async fn test_再確認ありでも未受付なら書き込む(store: InMemorySheetStore) {
   let (status, _) = send(
      app_with(&store, true),
      post_json("/api/checkin", json!({"regNo": "REG-001"})),
   )
   .await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(
      store.read_ranges(),
      vec!["Sheet1!A:D".to_string(), "Sheet1!A:D".to_string()]
   );
   assert_eq!(store.writes().len(), 1);
}

// ===== GET /api/stats =====

#[rstest]
#[tokio::test]
async fn test_集計はヘッダーを除いて数える(store: InMemorySheetStore) {
   let (status, body) = send(app(&store), get("/api/stats")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, json!({"total": 2, "scanned": 1, "remaining": 1}));
}

#[rstest]
#[tokio::test]
async fn test_集計は空のシートで0件() {
   let store = InMemorySheetStore::new();

   let (status, body) = send(app(&store), get("/api/stats")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, json!({"total": 0, "scanned": 0, "remaining": 0}));
}

#[rstest]
#[tokio::test]
async fn test_集計はストアの失敗で500(store: InMemorySheetStore) {
   store.fail_with(StoreFailure::Status(500, "backend error".to_string()));

   let (status, body) = send(app(&store), get("/api/stats")).await;

   assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
   assert_eq!(
      body,
      json!({"error": "Failed to get stats: unexpected status 500: backend error"})
   );
}

// ===== ミドルウェア =====

#[rstest]
#[tokio::test]
async fn test_ヘルスチェックはストアに触れない(store: InMemorySheetStore) {
   let (status, body) = send(app(&store), get("/health")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["status"], "healthy");
   assert!(store.read_ranges().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_レスポンスにx_request_idが付与される(store: InMemorySheetStore) {
   let response = app(&store).oneshot(get("/health")).await.unwrap();

   let id = response.headers().get("x-request-id").unwrap();
   let uuid = uuid_version(id.to_str().unwrap());
   assert_eq!(uuid, Some(7));
}

#[rstest]
#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される(store: InMemorySheetStore) {
   let request = Request::builder()
      .uri("/api/stats")
      .header("x-request-id", "client-provided-id")
      .body(Body::empty())
      .unwrap();

   let response = app(&store).oneshot(request).await.unwrap();

   assert_eq!(
      response.headers().get("x-request-id").unwrap(),
      "client-provided-id"
   );
}

#[rstest]
#[tokio::test]
async fn test_corsはどのオリジンも許可する(store: InMemorySheetStore) {
   let request = Request::builder()
      .uri("/api/stats")
      .header(header::ORIGIN, "https://kiosk.example.com")
      .body(Body::empty())
      .unwrap();

   let response = app(&store).oneshot(request).await.unwrap();

   assert_eq!(
      response
         .headers()
         .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
         .unwrap(),
      "*"
   );
}

/// UUID 文字列のバージョン番号（3 番目のグループの先頭桁）
fn uuid_version(id: &str) -> Option<u32> {
   id.split('-').nth(2)?.chars().next()?.to_digit(16)
}
