//! 端末への表示
//!
//! ViewModel をそのまま描画する。表示内容の判断はしない。

use indicatif::{ProgressBar, ProgressStyle};
use medvision_common::ViewModel;
use std::time::Duration;

const GAUGE_WIDTH: usize = 30;

/// 解析中のスピナー
pub fn busy_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// レポート部分の文字列
pub fn format_report(view: &ViewModel) -> Option<String> {
    let report = view.report.as_ref().filter(|_| view.report_visible)?;

    let mut out = String::new();
    out.push_str("📋 診断レポート\n");
    out.push_str(&"─".repeat(GAUGE_WIDTH + 10));
    out.push('\n');
    out.push_str(&report.body);
    out.push_str("\n\n");

    if view.metrics_visible {
        out.push_str(&format!(
            "AI信頼度: {} {}{}\n",
            report.confidence.bar(GAUGE_WIDTH),
            report.confidence.label,
            if report.confidence.clamped { " (範囲外の値を補正)" } else { "" }
        ));
    }

    Some(out)
}

pub fn print_view(view: &ViewModel) {
    if let Some(notice) = &view.notice {
        eprintln!("❌ {}", notice);
    }

    if let Some(report) = format_report(view) {
        println!("{}", report);
    }
}
