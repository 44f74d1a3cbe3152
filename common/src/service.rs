//! 解析サービスとの境界

use crate::error::Result;
use crate::request::AnalysisRequest;
use crate::types::AnalysisReport;
use async_trait::async_trait;

/// 画像とパラメータを受け取り、レポートを返す外部サービス
///
/// 実装側の約束:
/// - 失敗ステータスの応答は `Error::Service`
/// - 応答が得られなかった場合は `Error::Transport`
/// - 成功応答の中身が使えない場合は `Error::MalformedResponse`
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport>;

    /// ログ表示用の接続先
    fn endpoint(&self) -> &str;
}
