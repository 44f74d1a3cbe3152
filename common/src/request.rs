//! 解析リクエストの組み立て

use crate::error::{Error, Result};
use crate::intake::SelectedImage;
use crate::types::AnalysisParameters;

pub const FIELD_FILE: &str = "file";
pub const FIELD_API_KEY: &str = "api_key";
pub const FIELD_MODEL_ID: &str = "model_id";
pub const FIELD_FOCUS: &str = "focus";

/// multipartの1フィールド
#[derive(Debug, Clone, PartialEq)]
pub enum FormField<'a> {
    File {
        name: &'static str,
        file_name: &'a str,
        media_type: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'static str,
        value: &'a str,
    },
}

impl FormField<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FormField::File { name, .. } | FormField::Text { name, .. } => name,
        }
    }
}

/// 1回の解析試行で使い捨てるリクエスト
#[derive(Clone)]
pub struct AnalysisRequest {
    pub image: SelectedImage,
    pub params: AnalysisParameters,
}

impl AnalysisRequest {
    /// 送信するフィールド（常に4つ）
    pub fn form_fields(&self) -> [FormField<'_>; 4] {
        [
            FormField::File {
                name: FIELD_FILE,
                file_name: &self.image.file_name,
                media_type: &self.image.media_type,
                bytes: &self.image.bytes,
            },
            FormField::Text {
                name: FIELD_API_KEY,
                value: &self.params.api_key,
            },
            FormField::Text {
                name: FIELD_MODEL_ID,
                value: self.params.model.as_str(),
            },
            FormField::Text {
                name: FIELD_FOCUS,
                value: self.params.focus.as_str(),
            },
        ]
    }
}

impl std::fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("file_name", &self.image.file_name)
            .field("media_type", &self.image.media_type)
            .field("bytes", &self.image.bytes.len())
            .field("params", &self.params)
            .finish()
    }
}

/// 選択画像とパラメータからリクエストを作る
///
/// 画像未選択・APIキー未入力の場合はネットワーク処理の前に中断する。
pub fn build_request(
    image: Option<&SelectedImage>,
    params: &AnalysisParameters,
) -> Result<AnalysisRequest> {
    let image = image.ok_or(Error::NoImageSelected)?;

    if !params.has_credential() {
        return Err(Error::MissingCredential);
    }

    Ok(AnalysisRequest {
        image: image.clone(),
        params: params.clone(),
    })
}
