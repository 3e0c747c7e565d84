//! Regex-level HTML → text helpers for description bodies and document patterns.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<!--.*?-->")
        .expect("valid script/style regex")
});
static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|tr|dt|dd|h[1-6])\s*>").expect("valid break regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid tags regex"));
static NUMERIC_ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));").expect("valid numeric entity regex")
});
static LINE_BREAK_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|\r?\n").expect("valid line-break regex"));

fn numeric_reference(caps: &regex::Captures<'_>) -> Option<char> {
    let code = match (caps.get(1), caps.get(2)) {
        (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok()?,
        (None, Some(dec)) => dec.as_str().parse().ok()?,
        (None, None) => return None,
    };
    char::from_u32(code)
}

/// Decode numeric character references and the named entities that
/// survive in scraped markup. Invalid code points are left as written.
#[must_use]
pub fn decode_entities(s: &str) -> String {
    let numeric = NUMERIC_ENTITY_RE.replace_all(s, |caps: &regex::Captures<'_>| {
        numeric_reference(caps).map_or_else(|| caps[0].to_string(), String::from)
    });
    // `&amp;` last so an escaped reference stays literal.
    numeric
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Strip markup from an HTML fragment, turning line breaks and block
/// closers into newlines. Script and style bodies are dropped.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(html, "");
    let with_breaks = BREAK_RE.replace_all(&without_scripts, "\n");
    let without_tags = TAG_RE.replace_all(&with_breaks, "");
    decode_entities(&without_tags)
}

/// The text before the first line-break marker (`<br>`, `<br/>`, newline), trimmed.
#[must_use]
pub fn first_line(text: &str) -> &str {
    LINE_BREAK_MARKER_RE
        .split(text)
        .next()
        .unwrap_or_default()
        .trim()
}
