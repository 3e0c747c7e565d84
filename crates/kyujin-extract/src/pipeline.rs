//! One extraction call: decode, scan every source, merge, refine.

use std::sync::LazyLock;

use kyujin_core::{Field, Record, SiteConfig};
use scraper::{Html, Selector};

use crate::address::decompose_address;
use crate::encoding::{decode_document, resolve_encoding_label};
use crate::error::ExtractError;
use crate::html::html_to_text;
use crate::labels::extract_labeled_rows;
use crate::merge::{merge, SourceValues};
use crate::mine::mine_description;
use crate::normalize::TextNormalizer;
use crate::rules::{apply_extractors, extract_patterns, RuleInput};
use crate::selector::extract_selectors;
use crate::structured::extract_structured;

const MANAGER_KEYWORD: &str = "管理職";
const MANAGER_POSITION: &str = "管理職候補";
/// `<title>` keyword → facility type, first match wins.
const TITLE_FACILITY_TYPES: &[&str] = &["クリニック", "病院"];

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));

/// The record for one document plus what happened while decoding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub record: Record,
    /// Encoding label the bytes were decoded with; empty means UTF-8.
    pub encoding: String,
    /// Non-fatal decoding problems.
    pub diagnostics: Vec<String>,
}

/// Decode raw document bytes and extract a record.
///
/// The encoding is the site's `encoding` when set, else `declared` (e.g.
/// an HTTP `Content-Type` charset), else a `<meta charset>` in the document.
///
/// # Errors
///
/// Returns [`ExtractError::EmptyDocument`] when the decoded text is blank.
pub fn extract_document(
    bytes: &[u8],
    config: &SiteConfig,
    declared: Option<&str>,
) -> Result<Extraction, ExtractError> {
    let encoding = resolve_encoding_label(&config.encoding, declared, bytes);
    let decoded = decode_document(bytes, &encoding);
    let record = extract_html(&decoded.text, config)?;
    Ok(Extraction {
        record,
        encoding,
        diagnostics: decoded.diagnostic.into_iter().collect(),
    })
}

/// Extract a record from already-decoded HTML.
///
/// # Errors
///
/// Returns [`ExtractError::EmptyDocument`] when `html` is blank.
pub fn extract_html(html: &str, config: &SiteConfig) -> Result<Record, ExtractError> {
    if html.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    let normalizer = TextNormalizer::for_site(config);

    let structured = extract_structured(html, &normalizer);
    let document = Html::parse_document(html);

    let mut selector = extract_selectors(&document, config, &normalizer);
    let input = RuleInput {
        document: &document,
        source: html,
        postings: &structured.postings,
    };
    apply_extractors(config, &input, &normalizer, &mut selector);

    let labeled = extract_labeled_rows(&document, config, &normalizer);

    let mut mined = Record::default();
    for description in &structured.descriptions {
        mine_description(description, &mut mined, &normalizer);
    }

    let pattern = if config.patterns.is_empty() {
        Record::default()
    } else {
        extract_patterns(&html_to_text(html), config, &normalizer)
    };

    let mut record = merge(&SourceValues {
        structured: structured.record,
        selector,
        labeled,
        mined,
        pattern,
    });
    refine(&mut record, &page_title(&document));

    tracing::debug!(
        site = %config.name,
        fields = record.iter().filter(|(_, v)| !v.is_empty()).count(),
        "extraction complete"
    );
    Ok(record)
}

fn page_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect::<String>())
        .unwrap_or_default()
}

/// Post-merge refinements that derive fields from other fields and from
/// the page `<title>`. A record with nothing extracted stays empty.
fn refine(record: &mut Record, page_title: &str) {
    if record.is_blank() {
        return;
    }
    decompose_address(record);

    if !record.is_set(Field::TitleOriginal) {
        let name = record.name.clone();
        record.set(Field::TitleOriginal, name);
    }
    if !record.is_set(Field::Position) && record.name.contains(MANAGER_KEYWORD) {
        record.set(Field::Position, MANAGER_POSITION);
    }
    if !record.is_set(Field::FacilityType) {
        if let Some(kind) = TITLE_FACILITY_TYPES
            .iter()
            .find(|kind| page_title.contains(*kind))
        {
            record.set(Field::FacilityType, *kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_document_is_the_only_hard_failure() {
        let config = SiteConfig::generic();
        assert!(matches!(
            extract_html(" \n\t ", &config),
            Err(ExtractError::EmptyDocument)
        ));
        assert!(matches!(
            extract_document(b"", &config, None),
            Err(ExtractError::EmptyDocument)
        ));
        assert!(extract_html("<html></html>", &config).unwrap().is_blank());
    }

    #[test]
    fn title_original_mirrors_name_unless_set() {
        let mut record = Record::default();
        record.set(Field::Name, "病棟看護師");
        refine(&mut record, "");
        assert_eq!(record.title_original, "病棟看護師");

        let mut record = Record::default();
        record.set(Field::Name, "病棟看護師");
        record.set(Field::TitleOriginal, "【急募】病棟看護師");
        refine(&mut record, "");
        assert_eq!(record.title_original, "【急募】病棟看護師");
    }

    #[test]
    fn manager_title_implies_position() {
        let mut record = Record::default();
        record.set(Field::Name, "看護部長（管理職）");
        refine(&mut record, "");
        assert_eq!(record.position, "管理職候補");

        let mut record = Record::default();
        record.set(Field::Name, "管理職");
        record.set(Field::Position, "病棟");
        refine(&mut record, "");
        assert_eq!(record.position, "病棟");
    }

    #[test]
    fn page_title_is_last_resort_facility_type() {
        let mut record = Record::default();
        record.set(Field::Name, "看護師");
        refine(&mut record, "さくらクリニック附属病院 看護師求人");
        assert_eq!(record.facility_type, "クリニック");

        let mut record = Record::default();
        record.set(Field::Name, "看護師");
        refine(&mut record, "さくら総合病院 | 求人");
        assert_eq!(record.facility_type, "病院");

        let mut record = Record::default();
        record.set(Field::Name, "看護師");
        record.set(Field::FacilityType, "介護老人保健施設");
        refine(&mut record, "さくら病院");
        assert_eq!(record.facility_type, "介護老人保健施設");
    }

    #[test]
    fn blank_record_is_not_refined() {
        let mut record = Record::default();
        refine(&mut record, "さくらクリニック");
        assert!(record.is_blank());
    }

    #[test]
    fn facility_type_read_from_document_title() {
        let html = r#"<html><head><title>さくらクリニック 看護師求人</title>
            <script type="application/ld+json">{"@type": "JobPosting", "title": "看護師"}</script>
            </head><body></body></html>"#;
        let record = extract_html(html, &SiteConfig::generic()).unwrap();
        assert_eq!(record.facility_type, "クリニック");

        let without_posting = "<html><head><title>さくらクリニック</title></head><body></body></html>";
        assert!(extract_html(without_posting, &SiteConfig::generic())
            .unwrap()
            .is_blank());
    }

    #[test]
    fn decoding_diagnostic_is_reported_not_fatal() {
        let config = SiteConfig {
            encoding: "shift_jis".to_string(),
            ..SiteConfig::default()
        };
        let extraction = extract_document(b"<p>abc\x82 def</p>", &config, None).unwrap();
        assert_eq!(extraction.encoding, "shift_jis");
        assert_eq!(extraction.diagnostics.len(), 1);
    }
}
