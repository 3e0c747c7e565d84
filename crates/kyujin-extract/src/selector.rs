//! Per-field selector rules (CSS or path query) applied to the parsed document.

use kyujin_core::{Field, Record, SiteConfig};
use scraper::{ElementRef, Html, Selector};

use crate::normalize::TextNormalizer;
use crate::xpath::{is_path_query, xpath_values};

/// Parse a CSS selector, logging and discarding invalid rules.
pub(crate) fn parse_selector(rule: &str, field: &str) -> Option<Selector> {
    match Selector::parse(rule) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(field, rule, error = %e, "invalid selector rule; field left empty");
            None
        }
    }
}

/// Concatenated text content of `element`.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Trimmed text of the first match of `rule`, or `None` when the rule is
/// invalid or matches nothing. Rules starting with `/` or `(` are path
/// queries.
#[must_use]
pub fn select_text(document: &Html, rule: &str, field: Field) -> Option<String> {
    let text = if is_path_query(rule) {
        xpath_values(document, rule, field).into_iter().next()?
    } else {
        let selector = parse_selector(rule, field.as_str())?;
        element_text(document.select(&selector).next()?)
    };
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Apply every configured `selectors` rule. Fields without a rule, or whose
/// rule matches nothing, stay empty.
#[must_use]
pub fn extract_selectors(
    document: &Html,
    config: &SiteConfig,
    normalizer: &TextNormalizer,
) -> Record {
    let mut record = Record::default();
    for field in Field::ALL {
        let Some(rule) = config.selector_for(field) else {
            continue;
        };
        match select_text(document, rule, field) {
            Some(text) => record.set(field, normalizer.normalize(&text)),
            None => tracing::debug!(field = %field, rule, "selector matched nothing"),
        }
    }
    record
}
