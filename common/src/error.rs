//! エラー型定義

use thiserror::Error;

/// サービスがdetailを返さなかった場合のメッセージ
pub const FALLBACK_SERVICE_MESSAGE: &str = "Analysis Failed";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 画像以外のファイル（呼び出し側で黙って破棄される）
    #[error("Not an image: {0}")]
    InvalidInput(String),

    #[error("Please enter your Groq API key before starting the analysis")]
    MissingCredential,

    #[error("No image selected")]
    NoImageSelected,

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    /// 送信中でないのに結果が渡された
    #[error("No analysis is in progress")]
    NotAnalyzing,

    /// サービスが応答したが失敗ステータス
    #[error("{message}")]
    Service { status: u16, message: String },

    /// 応答なし（接続不可・タイムアウト）
    #[error("{0}")]
    Transport(String),

    #[error("Malformed response from analysis service: {0}")]
    MalformedResponse(String),

    #[error("No report document available")]
    NoDocument,

    #[error("Document decode error: {0}")]
    DocumentDecode(String),
}

impl Error {
    /// サービスエラーを生成（空メッセージはフォールバック）
    pub fn service(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_SERVICE_MESSAGE.to_string());
        Error::Service { status, message }
    }

    /// 解析サービスに到達できなかった場合のエラー
    pub fn unreachable(endpoint: &str, cause: impl std::fmt::Display) -> Self {
        Error::Transport(format!(
            "Could not connect to the analysis service at {}. Ensure the backend server is running. ({})",
            endpoint, cause
        ))
    }

    /// ユーザー操作で再試行できるエラーか
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Service { .. } | Error::Transport(_) | Error::MalformedResponse(_)
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
