//! Markdown subset transforms for refined prompts
//!
//! Refined prompts use a small, app-generated subset of markdown: headings,
//! `**bold**`, emphasis and `---` rules. This module turns that subset into
//! two outputs:
//!
//! - [`render_html`]: an HTML fragment for the preview pane
//! - [`plain_text`]: marker-free text for the clipboard
//!
//! Both are ordered sequences of regex substitutions over the whole string.
//! There is no parse tree, so the two functions must be kept in sync by hand.
//! They intentionally disagree on headings: the renderer converts levels 1–3
//! only, while the extractor strips markers for levels 1–6.
//!
//! Line anchors run in CRLF mode, so `\r` ends a line just like `\n` and
//! captured text never swallows a carriage return. Captures and `---` rules
//! also stop at the Unicode line and paragraph separators (U+2028, U+2029),
//! but a separator does not start a new line for `^`: `"a\u{2028}# b"` is
//! not a heading.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Options for [`render_html_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Entity-escape `&`, `<` and `>` before any markup is produced.
    ///
    /// Off by default: refined prompts come from a trusted pipeline and the
    /// preview accepts embedded markup. Turn it on for user-controlled input.
    pub escape_html: bool,
}

/// Output produced by [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Html,
    Text,
}

/// Apply the transform selected by `target`.
///
/// `options` only affects [`Target::Html`].
pub fn convert(markdown: &str, target: Target, options: RenderOptions) -> String {
    match target {
        Target::Html => render_html_with(markdown, options),
        Target::Text => plain_text(markdown),
    }
}

/// Render markdown to an HTML fragment without escaping.
///
/// Equivalent to [`render_html_with`] using [`RenderOptions::default`].
pub fn render_html(markdown: &str) -> String {
    render_html_with(markdown, RenderOptions::default())
}

/// Render markdown to an HTML fragment.
///
/// Passes run in this order: `###`, `##` and `#` headings (longest marker
/// first), `**bold**`, `---` rules, then every remaining `\n` becomes
/// `<br />`. The result is trimmed.
pub fn render_html_with(markdown: &str, options: RenderOptions) -> String {
    static RE_H3: OnceLock<Regex> = OnceLock::new();
    static RE_H2: OnceLock<Regex> = OnceLock::new();
    static RE_H1: OnceLock<Regex> = OnceLock::new();
    static RE_BOLD: OnceLock<Regex> = OnceLock::new();
    static RE_HR: OnceLock<Regex> = OnceLock::new();

    let source: Cow<'_, str> = if options.escape_html {
        html_escape::encode_text(markdown)
    } else {
        Cow::Borrowed(markdown)
    };

    let re_h3 = RE_H3.get_or_init(|| Regex::new(r"(?mR)^### ([^\r\n\x{2028}\x{2029}]*)").unwrap());
    let html = re_h3.replace_all(&source, "<h3>$1</h3>");

    let re_h2 = RE_H2.get_or_init(|| Regex::new(r"(?mR)^## ([^\r\n\x{2028}\x{2029}]*)").unwrap());
    let html = re_h2.replace_all(&html, "<h2>$1</h2>");

    let re_h1 = RE_H1.get_or_init(|| Regex::new(r"(?mR)^# ([^\r\n\x{2028}\x{2029}]*)").unwrap());
    let html = re_h1.replace_all(&html, "<h1>$1</h1>");

    let re_bold = RE_BOLD
        .get_or_init(|| Regex::new(r"\*\*([^\r\n\x{2028}\x{2029}]*?)\*\*").unwrap());
    let html = re_bold.replace_all(&html, "<strong>$1</strong>");

    let re_hr =
        RE_HR.get_or_init(|| Regex::new(r"(?mR)^---([\x{2028}\x{2029}]|$)").unwrap());
    let html = re_hr.replace_all(&html, "<hr />$1");

    html.replace('\n', "<br />").trim().to_string()
}

/// Strip markdown markers, keeping the text and the original line structure.
///
/// Removes heading markers (levels 1–6), `**bold**`, `*em*`, `__em__` and
/// `_em_` markers (in that order), blanks out `---` lines, then trims trailing
/// whitespace per line and surrounding whitespace overall.
pub fn plain_text(markdown: &str) -> String {
    static RE_HEADING: OnceLock<Regex> = OnceLock::new();
    static RE_BOLD: OnceLock<Regex> = OnceLock::new();
    static RE_EM_STAR: OnceLock<Regex> = OnceLock::new();
    static RE_STRONG_UNDERSCORE: OnceLock<Regex> = OnceLock::new();
    static RE_EM_UNDERSCORE: OnceLock<Regex> = OnceLock::new();
    static RE_HR: OnceLock<Regex> = OnceLock::new();

    // Never crosses the line end: "## " and "##" both collapse to "".
    let re_heading =
        RE_HEADING.get_or_init(|| Regex::new(r"(?mR)^#{1,6}(?:[^\S\r\n]+|$)").unwrap());
    let text = re_heading.replace_all(markdown, "");

    let re_bold = RE_BOLD
        .get_or_init(|| Regex::new(r"\*\*([^\r\n\x{2028}\x{2029}]*?)\*\*").unwrap());
    let text = re_bold.replace_all(&text, "$1");

    let re_em_star = RE_EM_STAR
        .get_or_init(|| Regex::new(r"\*([^\r\n\x{2028}\x{2029}]*?)\*").unwrap());
    let text = re_em_star.replace_all(&text, "$1");

    let re_strong_underscore = RE_STRONG_UNDERSCORE
        .get_or_init(|| Regex::new(r"__([^\r\n\x{2028}\x{2029}]*?)__").unwrap());
    let text = re_strong_underscore.replace_all(&text, "$1");

    let re_em_underscore = RE_EM_UNDERSCORE
        .get_or_init(|| Regex::new(r"_([^\r\n\x{2028}\x{2029}]*?)_").unwrap());
    let text = re_em_underscore.replace_all(&text, "$1");

    let re_hr =
        RE_HR.get_or_init(|| Regex::new(r"(?mR)^---([\x{2028}\x{2029}]|$)").unwrap());
    let text = re_hr.replace_all(&text, "$1");

    text.split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
