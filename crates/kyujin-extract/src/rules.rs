//! Configured extractors (`extractors`) and document patterns (`patterns`).

use kyujin_core::{ExtractorKind, ExtractorSpec, Field, Record, SiteConfig};
use regex::Regex;
use scraper::Html;
use serde_json::Value;

use crate::normalize::TextNormalizer;
use crate::selector::{element_text, parse_selector};
use crate::xpath::{is_path_query, xpath_values};

/// What an extractor can look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub document: &'a Html,
    /// The decoded document source.
    pub source: &'a str,
    /// Job-posting objects from the structured-data scan.
    pub postings: &'a [Value],
}

fn compile(pattern: &str, field: Field) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(field = %field, pattern, error = %e, "invalid regex rule; field left empty");
            None
        }
    }
}

/// Capture group 1 of the `index`-th match, or the whole match when the
/// pattern has no groups.
fn nth_capture(re: &Regex, haystack: &str, index: usize) -> Option<String> {
    let caps = re.captures_iter(haystack).nth(index)?;
    let matched = caps.get(1).or_else(|| caps.get(0))?;
    Some(matched.as_str().to_string())
}

/// Run one extractor spec. The result is raw (not yet normalized).
#[must_use]
pub fn run_extractor(spec: &ExtractorSpec, field: Field, input: &RuleInput<'_>) -> Option<String> {
    let value = match spec.kind {
        ExtractorKind::Selector if is_path_query(&spec.value) => {
            xpath_values(input.document, &spec.value, field)
                .into_iter()
                .nth(spec.match_index)?
        }
        ExtractorKind::Selector => {
            let selector = parse_selector(&spec.value, field.as_str())?;
            let element = input.document.select(&selector).nth(spec.match_index)?;
            match spec.attribute.trim() {
                "" | "text" => element_text(element),
                "html" => element.inner_html(),
                name => element.value().attr(name)?.to_string(),
            }
        }
        ExtractorKind::Regex => {
            let re = compile(&spec.value, field)?;
            nth_capture(&re, input.source, spec.match_index)?
        }
        ExtractorKind::Structured => {
            let posting = input.postings.get(spec.match_index)?;
            structured_path(posting, &spec.value)?
        }
    };
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Fill the empty fields of `record` from the site's configured extractors.
pub fn apply_extractors(
    config: &SiteConfig,
    input: &RuleInput<'_>,
    normalizer: &TextNormalizer,
    record: &mut Record,
) {
    for field in Field::ALL {
        if record.is_set(field) {
            continue;
        }
        let Some(spec) = config.extractor_for(field) else {
            continue;
        };
        if let Some(raw) = run_extractor(spec, field, input) {
            record.fill(field, &normalizer.normalize(&raw));
        }
    }
}

/// Follow a dot-separated path such as `baseSalary.value.minValue`.
///
/// Array steps take a numeric segment as an index; any other segment is
/// looked up in the array's first element. Scalars are stringified and
/// scalar arrays joined with `、`.
#[must_use]
pub fn structured_path(root: &Value, path: &str) -> Option<String> {
    let mut current = root;
    for segment in path.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        current = match current {
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(index) => items.get(index)?,
                Err(_) => items.first()?.get(segment)?,
            },
            other => other.get(segment)?,
        };
    }
    match current {
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(scalar_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("、");
            (!joined.is_empty()).then_some(joined)
        }
        other => scalar_text(other).filter(|s| !s.is_empty()),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Apply the site's `patterns` to the visible document text.
#[must_use]
pub fn extract_patterns(text: &str, config: &SiteConfig, normalizer: &TextNormalizer) -> Record {
    let mut record = Record::default();
    for field in Field::ALL {
        let Some(pattern) = config.pattern_for(field) else {
            continue;
        };
        let Some(re) = compile(pattern, field) else {
            continue;
        };
        if let Some(raw) = nth_capture(&re, text, 0) {
            record.set(field, normalizer.normalize(&raw));
        }
    }
    record
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
