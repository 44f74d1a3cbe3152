//! 画像ファイルの受付
//!
//! ファイル選択・ドラッグ&ドロップで渡されたファイルを検証し、
//! プレビュー用のData URLを生成する。

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};

/// ファイルの入手経路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSource {
    /// クリックで開いたファイル選択
    Chooser,
    /// ドロップ
    Drop,
}

/// 受付前のファイル
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub file_name: String,
    /// 宣言されたMIMEタイプ（例: "image/png"）
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// 選択中の画像
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    /// "data:image/png;base64,..." 形式
    pub preview: String,
}

impl SelectedImage {
    /// 画像ファイルのみ受け付ける
    pub fn from_candidate(candidate: FileCandidate) -> Result<Self> {
        if !is_image_media_type(&candidate.media_type) {
            return Err(Error::InvalidInput(candidate.media_type));
        }

        let preview = to_data_url(&candidate.media_type, &candidate.bytes);
        Ok(Self {
            file_name: candidate.file_name,
            media_type: candidate.media_type,
            bytes: candidate.bytes,
            preview,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// MIMEタイプが image/* か判定
pub fn is_image_media_type(media_type: &str) -> bool {
    let top_level = media_type.trim().split('/').next().unwrap_or("");
    let has_subtype = media_type
        .split_once('/')
        .map(|(_, sub)| !sub.trim().is_empty())
        .unwrap_or(false);
    top_level.eq_ignore_ascii_case("image") && has_subtype
}

/// バイト列をData URLに変換
pub fn to_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

/// ドロップ領域のハイライト
///
/// dragover/dragleaveは見た目だけで、選択中の画像には影響しない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    pub active: bool,
}

impl DropZone {
    pub fn drag_over(&mut self) {
        self.active = true;
    }

    pub fn drag_leave(&mut self) {
        self.active = false;
    }

    /// ドロップ完了でハイライト解除
    pub fn dropped(&mut self) {
        self.active = false;
    }
}
