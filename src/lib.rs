//! MedVision CLI
//!
//! 医用画像を解析サービスへ送り、レポート・信頼度・PDFを受け取る。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod pipeline;
pub mod terminal;
