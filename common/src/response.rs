//! 解析サービスのレスポンス解析
//!
//! 成功: `{"report": "...", "confidence": 88, "pdf_base64": "..."}`
//! 失敗: `{"detail": "..."}`（FastAPIのバリデーションエラーは配列）

use crate::document::EncodedDocument;
use crate::error::{Error, Result};
use crate::types::AnalysisReport;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SuccessBody {
    #[serde(default)]
    report: Option<String>,
    #[serde(default)]
    confidence: Option<Value>,
    #[serde(default)]
    pdf_base64: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FailureBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// 成功レスポンスを検証してAnalysisReportにする
pub fn parse_success(body: &str) -> Result<AnalysisReport> {
    let parsed: SuccessBody = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let report = parsed
        .report
        .ok_or_else(|| Error::MalformedResponse("missing field `report`".to_string()))?;

    let raw_confidence = match parsed.confidence {
        Some(Value::Null) | None => extract_confidence_from_report(&report).ok_or_else(|| {
            Error::MalformedResponse("missing field `confidence`".to_string())
        })?,
        Some(value) => confidence_from_value(&value)?,
    };

    let (confidence, confidence_clamped) = clamp_confidence(raw_confidence);
    if confidence_clamped {
        tracing::warn!(raw = raw_confidence, clamped = confidence, "confidence out of range");
    }

    let document = parsed.pdf_base64.and_then(EncodedDocument::new);
    if document.is_none() {
        tracing::debug!("response has no pdf_base64; download disabled");
    }

    Ok(AnalysisReport {
        report,
        confidence,
        confidence_clamped,
        document,
    })
}

/// 失敗レスポンスをエラーに変換（detailがなければ汎用メッセージ）
pub fn parse_failure(status: u16, body: &str) -> Error {
    let detail = serde_json::from_str::<FailureBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| detail_message(&d));
    Error::service(status, detail)
}

fn detail_message(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) => Some(s.clone()),
        // [{"loc": [...], "msg": "field required", ...}]
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn confidence_from_value(value: &Value) -> Result<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| Error::MalformedResponse(format!("invalid confidence: {}", value)))
}

/// 0〜100にクランプ。範囲外だったかも返す
pub fn clamp_confidence(value: f64) -> (f64, bool) {
    let clamped = value.clamp(0.0, 100.0);
    (clamped, clamped != value)
}

/// 本文中の "Confidence Score: 88%" を拾う
pub fn extract_confidence_from_report(report: &str) -> Option<f64> {
    lazy_static::lazy_static! {
        static ref CONFIDENCE_RE: Regex =
            Regex::new(r"(?i)confidence\s*score\s*[:：]?\s*\**\s*(\d+(?:\.\d+)?)\s*%").unwrap();
    }

    CONFIDENCE_RE
        .captures(report)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
