//! 画面表示の状態
//!
//! 表示・非表示はすべて WorkflowState から導出する。
//! 画面側の状態を正として扱わないこと。

use crate::render::RenderedReport;
use crate::types::WorkflowState;
use crate::workflow::WorkflowController;

/// ホスト画面に反映する値
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub state: WorkflowState,
    /// プレビュー画像（Data URL）
    pub preview: Option<String>,
    /// 解析開始ボタン
    pub trigger_enabled: bool,
    /// ローディング表示
    pub busy_visible: bool,
    pub report_visible: bool,
    /// 信頼度カード
    pub metrics_visible: bool,
    pub download_visible: bool,
    pub drop_zone_active: bool,
    /// エラー通知
    pub notice: Option<String>,
    pub report: Option<RenderedReport>,
}

impl ViewModel {
    pub fn project(controller: &WorkflowController) -> Self {
        let state = controller.state();
        let report_ready = state == WorkflowState::ReportReady;
        let report = if report_ready {
            controller.rendered().cloned()
        } else {
            None
        };

        Self {
            state,
            preview: controller.image().map(|img| img.preview.clone()),
            trigger_enabled: controller.image().is_some() && state != WorkflowState::Analyzing,
            busy_visible: state == WorkflowState::Analyzing,
            report_visible: report.is_some(),
            metrics_visible: report.is_some(),
            download_visible: report
                .as_ref()
                .map(RenderedReport::download_available)
                .unwrap_or(false),
            drop_zone_active: controller.drop_zone().active,
            notice: if state == WorkflowState::Failed {
                controller.notice().map(str::to_string)
            } else {
                None
            },
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::intake::{FileCandidate, IntakeSource};
    use crate::markup::MarkupStyle;
    use crate::types::AnalysisReport;

    fn report(document: Option<&str>) -> AnalysisReport {
        AnalysisReport {
            report: "ok".to_string(),
            confidence: 87.0,
            confidence_clamped: false,
            document: document.and_then(crate::document::EncodedDocument::new),
        }
    }

    fn controller_with_image() -> WorkflowController {
        let mut controller = WorkflowController::new(MarkupStyle::HTML);
        controller.params_mut().api_key = "gsk_test".to_string();
        controller.select_file(
            IntakeSource::Chooser,
            FileCandidate::new("x.png", "image/png", vec![1]),
        );
        controller
    }

    #[test]
    fn test_idle_view() {
        let view = ViewModel::project(&WorkflowController::default());
        assert_eq!(view.state, WorkflowState::Idle);
        assert!(view.preview.is_none());
        assert!(!view.trigger_enabled);
        assert!(!view.busy_visible);
        assert!(!view.report_visible);
        assert!(view.notice.is_none());
    }

    #[test]
    fn test_image_ready_view() {
        let view = ViewModel::project(&controller_with_image());
        assert!(view.trigger_enabled);
        assert_eq!(view.preview.as_deref(), Some("data:image/png;base64,AQ=="));
    }

    #[test]
    fn test_report_ready_view() {
        let mut controller = controller_with_image();
        controller.begin_analysis().unwrap();
        controller.finish_analysis(Ok(report(Some("JVBERi0=")))).unwrap();

        let view = ViewModel::project(&controller);
        assert!(view.trigger_enabled);
        assert!(!view.busy_visible);
        assert!(view.report_visible);
        assert!(view.metrics_visible);
        assert!(view.download_visible);
        assert_eq!(view.report.unwrap().confidence.label, "87%");
    }

    #[test]
    fn test_report_without_document_hides_download() {
        let mut controller = controller_with_image();
        controller.begin_analysis().unwrap();
        controller.finish_analysis(Ok(report(None))).unwrap();

        let view = ViewModel::project(&controller);
        assert!(view.report_visible);
        assert!(!view.download_visible);
    }

    #[test]
    fn test_new_selection_hides_previous_report() {
        let mut controller = controller_with_image();
        controller.begin_analysis().unwrap();
        controller.finish_analysis(Ok(report(Some("JVBERi0=")))).unwrap();
        controller.select_file(
            IntakeSource::Drop,
            FileCandidate::new("y.jpg", "image/jpeg", vec![2]),
        );

        let view = ViewModel::project(&controller);
        assert_eq!(view.state, WorkflowState::ImageReady);
        assert!(!view.report_visible);
        assert!(!view.download_visible);
    }

    #[test]
    fn test_failed_view_shows_notice() {
        let mut controller = controller_with_image();
        controller.begin_analysis().unwrap();
        let _ = controller.finish_analysis(Err(Error::service(422, Some("unsupported model".into()))));

        let view = ViewModel::project(&controller);
        assert_eq!(view.notice.as_deref(), Some("unsupported model"));
        assert!(view.trigger_enabled);
        assert!(!view.report_visible);
    }
}
