use clap::{Parser, Subcommand};
use medvision_common::{FocusMode, ModelId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medvision")]
#[command(about = "医用画像AI解析クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を解析サービスに送信してレポートを取得
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 解析モデル (scout/maverick/vision)
        #[arg(short, long)]
        model: Option<ModelId>,

        /// 診断フォーカス (lung/cardio/fracture/soft-tissue/neuro)
        #[arg(short, long)]
        focus: Option<FocusMode>,

        /// Groq APIキー（保存されません）
        #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// APIキーを対話入力
        #[arg(long)]
        prompt_key: bool,

        /// 解析サービスのURL
        #[arg(long)]
        endpoint: Option<String>,

        /// PDFの保存先（ディレクトリまたはファイル）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// PDFを保存しない
        #[arg(long)]
        no_download: bool,
    },

    /// 選択できるモデルとフォーカスを表示
    Models,

    /// 設定を表示/編集
    Config {
        /// 解析サービスのURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 既定のモデルを設定
        #[arg(long)]
        set_model: Option<ModelId>,

        /// 既定のフォーカスを設定
        #[arg(long)]
        set_focus: Option<FocusMode>,

        /// PDFの既定の保存先を設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
