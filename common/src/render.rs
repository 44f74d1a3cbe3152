//! 解析結果の表示用変換

use crate::document::EncodedDocument;
use crate::gauge::ConfidenceIndicator;
use crate::markup::{render_markup, MarkupStyle};
use crate::types::AnalysisReport;

/// 表示用レポート
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub body: String,
    pub confidence: ConfidenceIndicator,
    /// ダウンロード可能なPDF
    pub document: Option<EncodedDocument>,
}

impl RenderedReport {
    pub fn download_available(&self) -> bool {
        self.document.is_some()
    }
}

/// AnalysisReportを表示用に変換（元の値は変更しない）
pub fn render_report(report: &AnalysisReport, style: &MarkupStyle) -> RenderedReport {
    RenderedReport {
        body: render_markup(&report.report, style),
        confidence: ConfidenceIndicator::new(report.confidence, report.confidence_clamped),
        document: report.document.clone(),
    }
}
