//! PDFレポートの保持とエクスポート
//!
//! サービスから受け取ったbase64文字列はそのまま保持し、
//! エクスポート時にだけデコードする。

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

pub const REPORT_FILE_PREFIX: &str = "SV_MedVision_Report";
pub const DOCUMENT_MEDIA_TYPE: &str = "application/pdf";

/// base64エンコードされたドキュメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument(String);

impl EncodedDocument {
    /// 空文字列は「ドキュメントなし」
    pub fn new(encoded: impl Into<String>) -> Option<Self> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            None
        } else {
            Some(Self(encoded))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 元のバイト列に復元
    pub fn decode(&self) -> Result<Vec<u8>> {
        // 改行入りで返すサーバーもあるので空白は除去
        let compact: String = self.0.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| Error::DocumentDecode(e.to_string()))
    }

    /// ダウンロードリンク用のData URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", DOCUMENT_MEDIA_TYPE, self.0)
    }

    /// 指定時刻（UNIXミリ秒）でエクスポート
    pub fn export_at(&self, timestamp_millis: i64) -> Result<DocumentExport> {
        Ok(DocumentExport {
            file_name: export_file_name(timestamp_millis),
            media_type: DOCUMENT_MEDIA_TYPE,
            bytes: self.decode()?,
        })
    }

    /// 現在時刻でエクスポート
    pub fn export(&self) -> Result<DocumentExport> {
        self.export_at(chrono::Utc::now().timestamp_millis())
    }
}

/// 保存用に復元したドキュメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentExport {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// "SV_MedVision_Report_<ミリ秒>.pdf"
pub fn export_file_name(timestamp_millis: i64) -> String {
    format!("{}_{}.pdf", REPORT_FILE_PREFIX, timestamp_millis)
}
