//! Text normalization applied to every extracted value.
//!
//! Boilerplate link phrases and arrow glyphs are removed by plain substring
//! match, then whitespace is collapsed and the result trimmed. The whole pass
//! repeats until the text stops changing, so `normalize(normalize(s)) ==
//! normalize(s)` for every input.

use std::sync::LazyLock;

use kyujin_core::SiteConfig;
use regex::Regex;

/// UI affordances that leak into scraped text.
pub const DEFAULT_BOILERPLATE: &[&str] = &[
    "地図を見る",
    "地図で見る",
    "詳細を見る",
    "もっと見る",
    "続きを読む",
    "すべて見る",
    "view on map",
    "View on map",
    "read more",
    "Read more",
    "▶",
    "▷",
    "►",
    "▸",
    "»",
    "›",
];

static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank-lines regex"));
static INLINE_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]{2,}").expect("valid inline-space regex"));

static DEFAULT_NORMALIZER: LazyLock<TextNormalizer> = LazyLock::new(TextNormalizer::default);

/// Boilerplate-aware whitespace normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNormalizer {
    phrases: Vec<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::with_phrases(DEFAULT_BOILERPLATE.iter().copied())
    }
}

impl TextNormalizer {
    /// A normalizer removing exactly `phrases`. Empty phrases are ignored.
    pub fn with_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut normalizer = Self {
            phrases: Vec::new(),
        };
        normalizer.extend(phrases);
        normalizer
    }

    /// The built-in phrases plus the site's `boilerplate` list.
    #[must_use]
    pub fn for_site(config: &SiteConfig) -> Self {
        let mut normalizer = Self::default();
        normalizer.extend(config.boilerplate.iter().cloned());
        normalizer
    }

    fn extend<I, S>(&mut self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for phrase in phrases {
            let phrase = phrase.into();
            if !phrase.is_empty() && !self.phrases.contains(&phrase) {
                self.phrases.push(phrase);
            }
        }
    }

    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Normalize `text`: strip boilerplate, collapse blank lines and
    /// inline whitespace runs, trim.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            let next = self.pass(&current);
            if next == current {
                return next;
            }
            current = next;
        }
    }

    fn pass(&self, text: &str) -> String {
        let mut out = text.replace("\r\n", "\n").replace('\r', "\n");

        // Removing one phrase can join the halves of another.
        while let Some(phrase) = self.phrases.iter().find(|p| out.contains(p.as_str())) {
            out = out.replace(phrase.as_str(), "");
        }

        let out = BLANK_LINES_RE.replace_all(&out, "\n\n");
        let out = INLINE_SPACE_RE.replace_all(&out, " ");
        out.trim().to_string()
    }
}

/// Normalize with the built-in boilerplate list.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
