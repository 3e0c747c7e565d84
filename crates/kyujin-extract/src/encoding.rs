//! Legacy Japanese encodings → UTF-8.
//!
//! Decoding never fails the pipeline: unrecognized labels pass the content
//! through, and a failed decode returns the content as (lossy) UTF-8 with a
//! diagnostic attached.

use std::sync::LazyLock;

use encoding_rs::{Encoding, EUC_JP, ISO_2022_JP, SHIFT_JIS};

/// How far into a document to look for a `<meta charset>` declaration.
const META_SNIFF_BYTES: usize = 4096;

static META_CHARSET_RE: LazyLock<regex::bytes::Regex> = LazyLock::new(|| {
    regex::bytes::Regex::new(r#"(?i-u)<meta[^>]+charset\s*=\s*["']?([a-z0-9_\-]+)"#)
        .expect("valid meta charset regex")
});

/// Map a recognized legacy label (case-insensitive) to its encoding.
#[must_use]
pub fn legacy_encoding(label: &str) -> Option<&'static Encoding> {
    match label.trim().to_ascii_lowercase().as_str() {
        "shift_jis" | "shift-jis" | "sjis" | "x-sjis" | "windows-31j" | "cp932" => {
            Some(SHIFT_JIS)
        }
        "euc-jp" | "eucjp" | "x-euc-jp" => Some(EUC_JP),
        "iso-2022-jp" | "jis" => Some(ISO_2022_JP),
        _ => None,
    }
}

/// Result of [`decode_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Set when a recognized encoding failed to decode.
    pub diagnostic: Option<String>,
}

fn is_canonical(label: &str) -> bool {
    let label = label.trim();
    label.is_empty() || label.eq_ignore_ascii_case("utf-8") || label.eq_ignore_ascii_case("utf8")
}

/// Decode `bytes` according to `declared`, producing UTF-8 text.
#[must_use]
pub fn decode_document(bytes: &[u8], declared: &str) -> Decoded {
    let Some(encoding) = legacy_encoding(declared) else {
        if !is_canonical(declared) {
            tracing::debug!(
                encoding = declared,
                "unrecognized encoding; passing content through"
            );
        }
        return Decoded {
            text: String::from_utf8_lossy(bytes).into_owned(),
            diagnostic: None,
        };
    };

    if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
        tracing::debug!(encoding = encoding.name(), "converted document to UTF-8");
        return Decoded {
            text: text.into_owned(),
            diagnostic: None,
        };
    }

    let diagnostic = format!(
        "content is not valid {}; passed through unconverted",
        encoding.name()
    );
    tracing::warn!(encoding = encoding.name(), "{diagnostic}");
    Decoded {
        text: String::from_utf8_lossy(bytes).into_owned(),
        diagnostic: Some(diagnostic),
    }
}

/// Charset declared by an early `<meta charset=...>` or `http-equiv` tag.
#[must_use]
pub fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    let caps = META_CHARSET_RE.captures(head)?;
    let label = std::str::from_utf8(caps.get(1)?.as_bytes()).ok()?;
    Some(label.to_ascii_lowercase())
}

/// Choose the encoding label: site config, then the caller's declaration
/// (e.g. an HTTP `Content-Type` charset), then the document's own meta tag.
#[must_use]
pub fn resolve_encoding_label(
    configured: &str,
    declared: Option<&str>,
    bytes: &[u8],
) -> String {
    if !configured.trim().is_empty() {
        return configured.trim().to_string();
    }
    if let Some(declared) = declared.map(str::trim).filter(|d| !d.is_empty()) {
        return declared.to_string();
    }
    sniff_meta_charset(bytes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_and_empty_labels_are_noops() {
        let html = "<p>看護師</p>";
        for label in ["", "utf-8", "UTF-8", "utf8"] {
            let decoded = decode_document(html.as_bytes(), label);
            assert_eq!(decoded.text, html);
            assert!(decoded.diagnostic.is_none());
        }
    }

    #[test]
    fn decodes_shift_jis() {
        let (bytes, _, _) = SHIFT_JIS.encode("正社員(常勤)");
        let decoded = decode_document(&bytes, "Shift_JIS");
        assert_eq!(decoded.text, "正社員(常勤)");
        assert!(decoded.diagnostic.is_none());
    }

    #[test]
    fn decodes_sjis_alias_and_euc_jp() {
        let (sjis, _, _) = SHIFT_JIS.encode("病棟");
        assert_eq!(decode_document(&sjis, "sjis").text, "病棟");

        let (euc, _, _) = EUC_JP.encode("東京都渋谷区");
        assert_eq!(decode_document(&euc, "EUC-JP").text, "東京都渋谷区");
    }

    #[test]
    fn decodes_iso_2022_jp() {
        let (jis, _, _) = ISO_2022_JP.encode("外来");
        assert_eq!(decode_document(&jis, "iso-2022-jp").text, "外来");
    }

    #[test]
    fn unrecognized_label_passes_through() {
        let decoded = decode_document(b"plain ascii", "koi8-r");
        assert_eq!(decoded.text, "plain ascii");
        assert!(decoded.diagnostic.is_none());
    }

    #[test]
    fn failed_decode_returns_original_with_diagnostic() {
        // 0x82 followed by 0x20 is not a valid Shift_JIS sequence.
        let bytes = b"abc\x82 def";
        let decoded = decode_document(bytes, "shift_jis");
        assert!(decoded.text.starts_with("abc"));
        assert!(decoded.text.ends_with(" def"));
        assert!(decoded
            .diagnostic
            .as_deref()
            .is_some_and(|d| d.contains("Shift_JIS")));
    }

    #[test]
    fn sniffs_meta_charset() {
        let html = br#"<html><head><meta charset="Shift_JIS"></head>"#;
        assert_eq!(sniff_meta_charset(html).as_deref(), Some("shift_jis"));

        let http_equiv =
            br#"<meta http-equiv="Content-Type" content="text/html; charset=EUC-JP">"#;
        assert_eq!(sniff_meta_charset(http_equiv).as_deref(), Some("euc-jp"));

        assert!(sniff_meta_charset(b"<html></html>").is_none());
    }

    #[test]
    fn resolve_encoding_label_prefers_config_then_declared_then_meta() {
        let html = br#"<meta charset="euc-jp">"#;
        assert_eq!(resolve_encoding_label("shift_jis", Some("utf-8"), html), "shift_jis");
        assert_eq!(resolve_encoding_label("", Some("utf-8"), html), "utf-8");
        assert_eq!(resolve_encoding_label(" ", None, html), "euc-jp");
        assert_eq!(resolve_encoding_label("", Some(""), b"<p>x</p>"), "");
    }
}
