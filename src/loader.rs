//! ディスク上の画像ファイルを読み込む

use crate::error::{MedVisionError, Result};
use medvision_common::FileCandidate;
use std::path::Path;

/// ファイルを読み込み、拡張子からMIMEタイプを推定
///
/// 画像かどうかの判定は WorkflowController 側で行う。
pub async fn load_candidate(path: &Path) -> Result<FileCandidate> {
    if !path.is_file() {
        return Err(MedVisionError::FileNotFound(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(FileCandidate::new(file_name, guess_media_type(path), bytes))
}

pub fn guess_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
