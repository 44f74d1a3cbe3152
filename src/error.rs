use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedVisionError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ファイルではありません: {0}")]
    NotAnImage(String),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    HttpClient(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] medvision_common::Error),
}

impl MedVisionError {
    /// 同じ操作を再実行すれば回復し得るか
    pub fn is_retryable(&self) -> bool {
        match self {
            MedVisionError::Common(e) => e.is_retryable(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MedVisionError>;
