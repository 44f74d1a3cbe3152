//! 解析ワークフロー
//!
//! 画像受付 → リクエスト作成 → 送信 → レポート表示 の状態を一つのインスタンスで持つ。
//!
//! ```text
//! Idle ──select──▶ ImageReady ──begin──▶ Analyzing ──ok──▶ ReportReady
//!                      ▲                     │
//!                      └──select/retry── Failed ◀──error──┘
//! ```
//!
//! 同時に走る解析は常に1件まで。`Analyzing` 中の開始要求は拒否する。

use crate::document::{DocumentExport, EncodedDocument};
use crate::error::{Error, Result};
use crate::intake::{DropZone, FileCandidate, IntakeSource, SelectedImage};
use crate::markup::MarkupStyle;
use crate::render::{render_report, RenderedReport};
use crate::request::{build_request, AnalysisRequest};
use crate::service::AnalysisService;
use crate::types::{AnalysisParameters, AnalysisReport, WorkflowState};

pub const INTERRUPTED_MESSAGE: &str = "Analysis was interrupted before the service responded";

/// ワークフローコントローラ
#[derive(Debug, Default)]
pub struct WorkflowController {
    state: WorkflowState,
    image: Option<SelectedImage>,
    params: AnalysisParameters,
    report: Option<AnalysisReport>,
    rendered: Option<RenderedReport>,
    notice: Option<String>,
    drop_zone: DropZone,
    style: MarkupStyle,
}

impl WorkflowController {
    pub fn new(style: MarkupStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn params(&self) -> &AnalysisParameters {
        &self.params
    }

    /// 設定欄の値（送信時に読み出す）
    pub fn params_mut(&mut self) -> &mut AnalysisParameters {
        &mut self.params
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn rendered(&self) -> Option<&RenderedReport> {
        self.rendered.as_ref()
    }

    /// 直近の失敗メッセージ
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    pub fn is_analyzing(&self) -> bool {
        self.state == WorkflowState::Analyzing
    }

    pub fn drag_over(&mut self) {
        self.drop_zone.drag_over();
    }

    pub fn drag_leave(&mut self) {
        self.drop_zone.drag_leave();
    }

    /// ファイル選択・ドロップ
    ///
    /// 画像以外や解析中の選択は黙って無視する（状態は変わらない）。
    /// 受け付けた場合は true。
    pub fn select_file(&mut self, source: IntakeSource, candidate: FileCandidate) -> bool {
        if source == IntakeSource::Drop {
            self.drop_zone.dropped();
        }

        if self.is_analyzing() {
            tracing::debug!(file = %candidate.file_name, "intake ignored while analyzing");
            return false;
        }

        match SelectedImage::from_candidate(candidate) {
            Ok(image) => {
                tracing::debug!(
                    file = %image.file_name,
                    media_type = %image.media_type,
                    bytes = image.size(),
                    ?source,
                    "image selected"
                );
                self.image = Some(image);
                self.notice = None;
                self.transition(WorkflowState::ImageReady);
                true
            }
            Err(e) => {
                tracing::debug!(?source, "intake rejected: {}", e);
                false
            }
        }
    }

    /// 解析開始（Analyzing へ遷移してリクエストを返す）
    ///
    /// APIキー未入力・画像未選択の場合は状態を変えずにエラーを返す。
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest> {
        if self.is_analyzing() {
            return Err(Error::AnalysisInProgress);
        }

        let request = build_request(self.image.as_ref(), &self.params)?;

        self.report = None;
        self.rendered = None;
        self.notice = None;
        self.transition(WorkflowState::Analyzing);

        Ok(request)
    }

    /// 解析結果を反映（成功なら ReportReady、失敗なら Failed）
    ///
    /// Analyzing 以外では結果を捨てて NotAnalyzing を返す（状態は変わらない）。
    pub fn finish_analysis(&mut self, outcome: Result<AnalysisReport>) -> Result<&RenderedReport> {
        if !self.is_analyzing() {
            tracing::warn!(state = self.state.as_str(), "analysis result without a dispatched request");
            return Err(Error::NotAnalyzing);
        }

        match outcome {
            Ok(report) => {
                let rendered = render_report(&report, &self.style);
                self.report = Some(report);
                self.notice = None;
                self.transition(WorkflowState::ReportReady);
                let rendered: &RenderedReport = self.rendered.insert(rendered);
                Ok(rendered)
            }
            Err(e) => {
                tracing::warn!("analysis failed: {}", e);
                self.report = None;
                self.rendered = None;
                self.notice = Some(e.to_string());
                self.transition(WorkflowState::Failed);
                Err(e)
            }
        }
    }

    /// 解析を実行
    ///
    /// どの終了経路でも Analyzing を抜ける。future が途中で破棄された場合も
    /// Failed として片付ける。
    pub async fn analyze<S>(&mut self, service: &S) -> Result<&RenderedReport>
    where
        S: AnalysisService + ?Sized,
    {
        let flight = InFlight::begin(self)?;
        tracing::debug!(endpoint = service.endpoint(), request = ?flight.request, "dispatching");
        let outcome = service.analyze(&flight.request).await;
        flight.settle(outcome)
    }

    /// 表示中レポートのPDF
    pub fn document(&self) -> Option<&EncodedDocument> {
        if self.state != WorkflowState::ReportReady {
            return None;
        }
        self.report.as_ref().and_then(|r| r.document.as_ref())
    }

    /// PDFをタイムスタンプ付きファイルとして復元（何度でも呼べる）
    pub fn export_document(&self) -> Result<DocumentExport> {
        self.document().ok_or(Error::NoDocument)?.export()
    }

    fn transition(&mut self, next: WorkflowState) {
        if self.state != next {
            tracing::debug!(from = self.state.as_str(), to = next.as_str(), "workflow transition");
        }
        self.state = next;
    }

    fn abandon(&mut self) {
        if self.is_analyzing() {
            tracing::warn!("{}", INTERRUPTED_MESSAGE);
            self.notice = Some(INTERRUPTED_MESSAGE.to_string());
            self.transition(WorkflowState::Failed);
        }
    }
}

/// 送信中の1件
///
/// settle されずに破棄された場合は Drop で Failed に戻す。
struct InFlight<'a> {
    controller: Option<&'a mut WorkflowController>,
    request: AnalysisRequest,
}

impl<'a> InFlight<'a> {
    fn begin(controller: &'a mut WorkflowController) -> Result<Self> {
        let request = controller.begin_analysis()?;
        Ok(Self {
            controller: Some(controller),
            request,
        })
    }

    fn settle(mut self, outcome: Result<AnalysisReport>) -> Result<&'a RenderedReport> {
        match self.controller.take() {
            Some(controller) => controller.finish_analysis(outcome),
            None => Err(Error::Transport(INTERRUPTED_MESSAGE.to_string())),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.abandon();
        }
    }
}
