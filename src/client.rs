//! 解析サービスへのHTTP送信
//!
//! multipart で file / api_key / model_id / focus を POST する。

use crate::error::{MedVisionError, Result};
use async_trait::async_trait;
use medvision_common::{
    parse_failure, parse_success, AnalysisReport, AnalysisRequest, AnalysisService, Error,
    FormField,
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// HTTP経由の解析サービス
pub struct HttpAnalysisService {
    endpoint: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpAnalysisService {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MedVisionError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim().to_string(),
            client,
            timeout_secs,
        })
    }

    fn build_form(request: &AnalysisRequest) -> std::result::Result<Form, Error> {
        let mut form = Form::new();

        for field in request.form_fields() {
            form = match field {
                FormField::File { name, file_name, media_type, bytes } => {
                    let part = Part::bytes(bytes.to_vec())
                        .file_name(file_name.to_string())
                        .mime_str(media_type)
                        .map_err(|e| Error::InvalidInput(format!("{}: {}", media_type, e)))?;
                    form.part(name, part)
                }
                FormField::Text { name, value } => form.text(name, value.to_string()),
            };
        }

        Ok(form)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Transport(format!(
                "The analysis service at {} did not respond within {}s",
                self.endpoint, self.timeout_secs
            ))
        } else {
            Error::unreachable(&self.endpoint, e)
        }
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> std::result::Result<AnalysisReport, Error> {
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        // ステータス受信後の切断も「応答なし」扱い
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "analysis response");

        if status.is_success() {
            parse_success(&body)
        } else {
            Err(parse_failure(status.as_u16(), &body))
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
