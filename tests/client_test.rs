//! HTTP送信の統合テスト
//!
//! ローカルのモックサービスに対して送信内容とエラー分類を検証

mod mock_service;

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine};
use medvision::client::HttpAnalysisService;
use medvision_common::{
    build_request, AnalysisParameters, AnalysisService, Error, FileCandidate, FocusMode, ModelId,
    SelectedImage,
};
use serde_json::json;
use std::time::Duration;

const IMAGE_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn request() -> medvision_common::AnalysisRequest {
    let image = SelectedImage::from_candidate(FileCandidate::new(
        "chest.png",
        "image/png",
        IMAGE_BYTES.to_vec(),
    ))
    .unwrap();
    let params = AnalysisParameters::new("gsk_test_key", ModelId::Llama4Scout, FocusMode::SoftTissue);
    build_request(Some(&image), &params).unwrap()
}

/// 4つのフィールドがそのまま届く
#[tokio::test]
async fn test_sends_four_multipart_fields() {
    let pdf = STANDARD.encode(b"%PDF-1.4 report");
    let mock = mock_service::start(
        StatusCode::OK,
        json!({"report": "[CLINICAL FINDINGS]\nNo acute disease", "confidence": 92, "pdf_base64": pdf}),
    )
    .await;

    let service = HttpAnalysisService::new(&mock.endpoint(), 10).unwrap();
    let report = service.analyze(&request()).await.expect("analysis failed");

    assert_eq!(report.confidence, 92.0);
    assert_eq!(report.report, "[CLINICAL FINDINGS]\nNo acute disease");
    assert_eq!(report.document.unwrap().decode().unwrap(), b"%PDF-1.4 report");

    let fields = mock.last_request();
    assert_eq!(fields.len(), 4);

    let file = &fields["file"];
    assert_eq!(file.bytes, IMAGE_BYTES);
    assert_eq!(file.file_name.as_deref(), Some("chest.png"));
    assert_eq!(file.content_type.as_deref(), Some("image/png"));

    assert_eq!(fields["api_key"].text(), "gsk_test_key");
    assert_eq!(fields["model_id"].text(), "meta-llama/llama-4-scout-17b-16e-instruct");
    assert_eq!(fields["focus"].text(), "Soft Tissue");
}

/// detail付きの失敗応答
#[tokio::test]
async fn test_service_error_detail() {
    let mock = mock_service::start(StatusCode::BAD_REQUEST, json!({"detail": "unsupported model"})).await;

    let service = HttpAnalysisService::new(&mock.endpoint(), 10).unwrap();
    let err = service.analyze(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Service { status: 400, .. }));
    assert_eq!(format!("{}", err), "unsupported model");
}

/// detailなしの失敗応答
#[tokio::test]
async fn test_service_error_fallback() {
    let mock = mock_service::start(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;

    let service = HttpAnalysisService::new(&mock.endpoint(), 10).unwrap();
    let err = service.analyze(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Service { status: 500, .. }));
    assert_eq!(format!("{}", err), "Analysis Failed");
}

/// 接続できない場合はTransport
#[tokio::test]
async fn test_unreachable_service() {
    let endpoint = mock_service::unreachable_endpoint().await;

    let service = HttpAnalysisService::new(&endpoint, 5).unwrap();
    let err = service.analyze(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    let message = format!("{}", err);
    assert!(message.contains("Could not connect"));
    assert!(message.contains(&endpoint));
}

/// 成功ステータスでも中身が不正ならMalformedResponse
#[tokio::test]
async fn test_malformed_success_body() {
    let mock = mock_service::start(StatusCode::OK, json!({"confidence": 88})).await;

    let service = HttpAnalysisService::new(&mock.endpoint(), 10).unwrap();
    let err = service.analyze(&request()).await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse(_)));
}

/// 制限時間内に応答がなければTransport（サービスエラーとは別の文言）
#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock = mock_service::start_delayed(
        StatusCode::BAD_REQUEST,
        json!({"detail": "unsupported model"}),
        Duration::from_secs(3),
    )
    .await;

    let service = HttpAnalysisService::new(&mock.endpoint(), 1).unwrap();
    let err = service.analyze(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_retryable());
    let message = format!("{}", err);
    assert!(message.contains("did not respond within 1s"), "{}", message);
    assert_ne!(message, "unsupported model");
}

/// ステータス受信後に本文が途切れた場合もTransport
#[tokio::test]
async fn test_truncated_body_is_transport_error() {
    let endpoint = mock_service::truncated_body_endpoint().await;

    let service = HttpAnalysisService::new(&endpoint, 5).unwrap();
    let err = service.analyze(&request()).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)), "{:?}", err);
    assert!(format!("{}", err).contains(&endpoint));
}
