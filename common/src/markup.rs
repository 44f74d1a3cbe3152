//! レポート本文の簡易マークアップ変換
//!
//! - 改行 → 改行タグ
//! - `[...]` → 強調
//!
//! 対応の取れない括弧・空の括弧はそのまま出力する。

/// 出力先ごとのタグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupStyle {
    pub emphasis_open: &'static str,
    pub emphasis_close: &'static str,
    pub line_break: &'static str,
    /// `&`, `<`, `>` をエスケープする
    pub escape_html: bool,
}

impl MarkupStyle {
    pub const HTML: MarkupStyle = MarkupStyle {
        emphasis_open: "<strong>",
        emphasis_close: "</strong>",
        line_break: "<br>",
        escape_html: true,
    };

    /// ANSI太字
    pub const TERMINAL: MarkupStyle = MarkupStyle {
        emphasis_open: "\x1b[1m",
        emphasis_close: "\x1b[0m",
        line_break: "\n",
        escape_html: false,
    };

    pub const PLAIN: MarkupStyle = MarkupStyle {
        emphasis_open: "",
        emphasis_close: "",
        line_break: "\n",
        escape_html: false,
    };
}

impl Default for MarkupStyle {
    fn default() -> Self {
        MarkupStyle::HTML
    }
}

/// レポート本文を表示用に変換
pub fn render_markup(text: &str, style: &MarkupStyle) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        push_text(&mut out, &rest[..open], style);
        let after = &rest[open + 1..];

        match after.find(']') {
            Some(close) if close > 0 => {
                out.push_str(style.emphasis_open);
                push_text(&mut out, &after[..close], style);
                out.push_str(style.emphasis_close);
                rest = &after[close + 1..];
            }
            _ => {
                // 空の括弧・閉じ括弧なしはそのまま
                out.push('[');
                rest = after;
            }
        }
    }
    push_text(&mut out, rest, style);

    out
}

fn push_text(out: &mut String, text: &str, style: &MarkupStyle) {
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str(style.line_break),
            '&' if style.escape_html => out.push_str("&amp;"),
            '<' if style.escape_html => out.push_str("&lt;"),
            '>' if style.escape_html => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
