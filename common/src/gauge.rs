//! 信頼度インジケータ

/// 信頼度の表示値
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceIndicator {
    /// "87%"
    pub label: String,
    /// バーの幅（0〜100 %）
    pub fill_percent: f64,
    pub clamped: bool,
}

impl ConfidenceIndicator {
    pub fn new(confidence: f64, clamped: bool) -> Self {
        // -0.0 は 0 に揃える
        let value = confidence.clamp(0.0, 100.0) + 0.0;
        Self {
            label: format!("{}%", format_percent(value)),
            fill_percent: value,
            clamped,
        }
    }

    /// CSSのwidth値
    pub fn fill_width(&self) -> String {
        format!("{}%", format_percent(self.fill_percent))
    }

    /// 端末用のバー（`width` 文字）
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.fill_percent / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
    }
}

/// 整数はそのまま、それ以外は小数1桁
fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
