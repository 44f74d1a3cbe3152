//! 画像読み込み → 解析 → PDF保存 の一括処理

use crate::error::{MedVisionError, Result};
use crate::{export, loader, terminal};
use medvision_common::{AnalysisService, IntakeSource, ViewModel, WorkflowController};
use std::path::{Path, PathBuf};

/// ファイルを選択して解析する
///
/// 失敗時も controller は再試行できる状態に戻っている。
pub async fn analyze_file<S>(
    controller: &mut WorkflowController,
    service: &S,
    image: &Path,
    show_spinner: bool,
) -> Result<ViewModel>
where
    S: AnalysisService + ?Sized,
{
    let candidate = loader::load_candidate(image).await?;
    let media_type = candidate.media_type.clone();

    // コントローラは画像以外を黙って無視するので、CLIでは理由を伝える
    if !controller.select_file(IntakeSource::Chooser, candidate) {
        return Err(MedVisionError::NotAnImage(format!(
            "{} ({})",
            image.display(),
            media_type
        )));
    }

    let spinner = show_spinner.then(|| terminal::busy_spinner("AI解析中..."));
    let outcome = controller.analyze(service).await.map(|_| ());
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    outcome?;
    Ok(ViewModel::project(controller))
}

/// 表示中レポートのPDFを保存
pub fn save_report_document(
    controller: &WorkflowController,
    output: &Path,
) -> Result<Option<PathBuf>> {
    if controller.document().is_none() {
        return Ok(None);
    }

    let document = controller.export_document()?;
    let path = export::save_document(&document, output)?;
    Ok(Some(path))
}
