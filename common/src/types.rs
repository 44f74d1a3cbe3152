//! ワークフローの型定義
//!
//! CLIとホスト画面で共有される型:
//! - ModelId / FocusMode: サービスに渡す列挙値
//! - AnalysisParameters: ユーザー設定（APIキー・モデル・フォーカス）
//! - AnalysisReport: サービスの解析結果
//! - WorkflowState: ワークフローの状態

use crate::document::EncodedDocument;
use serde::{Deserialize, Serialize};

/// 解析エンジン（Groq上のマルチモーダルモデル）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelId {
    /// Llama 4 Scout（推奨）
    #[default]
    #[serde(rename = "meta-llama/llama-4-scout-17b-16e-instruct")]
    Llama4Scout,
    #[serde(rename = "meta-llama/llama-4-maverick-17b-128e-instruct")]
    Llama4Maverick,
    #[serde(rename = "llama-3.2-11b-vision-preview")]
    Llama32Vision,
}

impl ModelId {
    pub const ALL: [ModelId; 3] = [
        ModelId::Llama4Scout,
        ModelId::Llama4Maverick,
        ModelId::Llama32Vision,
    ];

    /// サービスに送る識別子
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Llama4Scout => "meta-llama/llama-4-scout-17b-16e-instruct",
            ModelId::Llama4Maverick => "meta-llama/llama-4-maverick-17b-128e-instruct",
            ModelId::Llama32Vision => "llama-3.2-11b-vision-preview",
        }
    }

    /// CLI用の短縮名
    pub fn short_name(&self) -> &'static str {
        match self {
            ModelId::Llama4Scout => "scout",
            ModelId::Llama4Maverick => "maverick",
            ModelId::Llama32Vision => "vision",
        }
    }
}

impl std::str::FromStr for ModelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ModelId::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s || m.short_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("Unknown model: {}. Use scout, maverick, or vision", s)
            })
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 診断フォーカス領域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FocusMode {
    #[default]
    #[serde(rename = "Lung Parenchyma")]
    LungParenchyma,
    #[serde(rename = "Cardiomegaly")]
    Cardiomegaly,
    #[serde(rename = "Fracture/Orthopedic")]
    FractureOrthopedic,
    #[serde(rename = "Soft Tissue")]
    SoftTissue,
    #[serde(rename = "Neurological")]
    Neurological,
}

impl FocusMode {
    pub const ALL: [FocusMode; 5] = [
        FocusMode::LungParenchyma,
        FocusMode::Cardiomegaly,
        FocusMode::FractureOrthopedic,
        FocusMode::SoftTissue,
        FocusMode::Neurological,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusMode::LungParenchyma => "Lung Parenchyma",
            FocusMode::Cardiomegaly => "Cardiomegaly",
            FocusMode::FractureOrthopedic => "Fracture/Orthopedic",
            FocusMode::SoftTissue => "Soft Tissue",
            FocusMode::Neurological => "Neurological",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            FocusMode::LungParenchyma => "lung",
            FocusMode::Cardiomegaly => "cardio",
            FocusMode::FractureOrthopedic => "fracture",
            FocusMode::SoftTissue => "soft-tissue",
            FocusMode::Neurological => "neuro",
        }
    }
}

impl std::str::FromStr for FocusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FocusMode::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s) || f.short_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown focus: {}. Use lung, cardio, fracture, soft-tissue, or neuro",
                    s
                )
            })
    }
}

impl std::fmt::Display for FocusMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 解析パラメータ
///
/// APIキーはどこにも保存しない。Debug出力でも伏せる。
#[derive(Clone, Default, PartialEq)]
pub struct AnalysisParameters {
    pub api_key: String,
    pub model: ModelId,
    pub focus: FocusMode,
}

impl AnalysisParameters {
    pub fn new(api_key: impl Into<String>, model: ModelId, focus: FocusMode) -> Self {
        Self {
            api_key: api_key.into(),
            model,
            focus,
        }
    }

    /// 空白のみのキーも未入力扱い
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl std::fmt::Debug for AnalysisParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisParameters")
            .field("api_key", &if self.has_credential() { "<redacted>" } else { "<empty>" })
            .field("model", &self.model)
            .field("focus", &self.focus)
            .finish()
    }
}

/// 検証済みの解析結果
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// レポート本文（簡易マークアップ）
    pub report: String,
    /// 信頼度（0〜100にクランプ済み）
    pub confidence: f64,
    /// サービスが返した値が範囲外だった
    pub confidence_clamped: bool,
    /// PDFレポート（base64のまま保持）
    pub document: Option<EncodedDocument>,
}

/// ワークフローの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    ImageReady,
    Analyzing,
    ReportReady,
    Failed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::ImageReady => "image-ready",
            WorkflowState::Analyzing => "analyzing",
            WorkflowState::ReportReady => "report-ready",
            WorkflowState::Failed => "failed",
        }
    }
}
