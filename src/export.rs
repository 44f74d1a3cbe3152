//! PDFレポートの保存

use crate::error::Result;
use medvision_common::DocumentExport;
use std::path::{Path, PathBuf};

/// 保存先を決める
///
/// ディレクトリ（または拡張子なし）ならタイムスタンプ付きファイル名を付与する。
pub fn output_path_for(output: &Path, export: &DocumentExport) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(&export.file_name)
    } else {
        output.to_path_buf()
    }
}

/// ドキュメントを書き出して保存先を返す
pub fn save_document(export: &DocumentExport, output: &Path) -> Result<PathBuf> {
    let path = output_path_for(output, export);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&path, &export.bytes)?;
    tracing::debug!(path = %path.display(), bytes = export.bytes.len(), "document saved");

    Ok(path)
}
