//! 設定ファイル（~/.config/medvision/config.json）
//!
//! APIキーは保存しない。

use crate::error::{MedVisionError, Result};
use medvision_common::{FocusMode, ModelId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub model: ModelId,
    pub focus: FocusMode,
    pub timeout_seconds: u64,
    /// PDFの保存先（省略時はカレント）
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            model: ModelId::default(),
            focus: FocusMode::default(),
            // 検索エージェントを含む解析は時間がかかる
            timeout_seconds: 120,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MedVisionError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("medvision").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(MedVisionError::Config(format!(
                "エンドポイントはhttp(s)のURLで指定してください: {}",
                self.endpoint
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(MedVisionError::Config("timeout_secondsは1以上にしてください".into()));
        }
        Ok(())
    }

    /// PDF保存先（指定 > 設定 > カレント）
    pub fn resolve_output_dir(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
