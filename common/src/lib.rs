//! MedVision Common Library
//!
//! CLIとホスト画面で共有されるワークフローの中核:
//! 画像受付・リクエスト作成・解析送信・レポート表示

pub mod error;
pub mod types;
pub mod intake;
pub mod request;
pub mod response;
pub mod service;
pub mod markup;
pub mod gauge;
pub mod document;
pub mod render;
pub mod workflow;
pub mod view;

pub use error::{Error, Result};
pub use types::{AnalysisParameters, AnalysisReport, FocusMode, ModelId, WorkflowState};
pub use intake::{FileCandidate, IntakeSource, SelectedImage};
pub use request::{build_request, AnalysisRequest, FormField};
pub use response::{parse_failure, parse_success};
pub use service::AnalysisService;
pub use markup::{render_markup, MarkupStyle};
pub use gauge::ConfidenceIndicator;
pub use document::{DocumentExport, EncodedDocument};
pub use render::{render_report, RenderedReport};
pub use workflow::WorkflowController;
pub use view::ViewModel;
