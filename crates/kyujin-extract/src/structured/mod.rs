//! Embedded schema.org `JobPosting` extraction.
//!
//! Blocks are found with a regex rather than a DOM walk so that broken
//! surrounding markup cannot hide them. Within and across blocks the first
//! non-empty value for a field wins.

mod schema;

use std::sync::LazyLock;

use kyujin_core::{Field, Record};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::html::{first_line, html_to_text};
use crate::normalize::TextNormalizer;

pub use schema::{contract_label, AddressValue, JobPosting, TextValue};
use schema::{MonetaryAmount, OrganizationValue};

static LD_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid ld+json regex")
});

/// Everything recovered from a document's structured-data blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredData {
    /// Fields mapped from the postings, first block wins.
    pub record: Record,
    /// Each posting's description as plain text, in document order.
    pub descriptions: Vec<String>,
    /// The raw posting objects, for path-based extractors.
    pub postings: Vec<Value>,
}

/// Scan `html` for `application/ld+json` blocks and map every job posting
/// they contain. Never fails; malformed blocks are skipped.
#[must_use]
pub fn extract_structured(html: &str, normalizer: &TextNormalizer) -> StructuredData {
    let mut data = StructuredData::default();

    for (block, cap) in LD_JSON_RE.captures_iter(html).enumerate() {
        let Some(body) = cap.get(1) else {
            continue;
        };

        for candidate in parse_block(body.as_str(), block) {
            let posting = match JobPosting::deserialize(&candidate) {
                Ok(posting) => posting,
                Err(e) => {
                    tracing::debug!(block, error = %e, "skipping non-object structured-data item");
                    continue;
                }
            };
            if !posting.is_job_posting() {
                continue;
            }

            apply_posting(&posting, &mut data.record, normalizer);
            if let Some(description) = posting.description.as_deref() {
                let text = normalizer.normalize(&html_to_text(description));
                if !text.is_empty() {
                    data.descriptions.push(text);
                }
            }
            data.postings.push(candidate);
        }
    }

    tracing::debug!(postings = data.postings.len(), "structured-data scan complete");
    data
}

/// A block holds one object, an array of objects, or a `@graph` container.
fn parse_block(text: &str, block: usize) -> Vec<Value> {
    let value: Value = match serde_json::from_str(text.trim()) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(block, error = %e, "skipping malformed structured-data block");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    items
        .into_iter()
        .flat_map(expand_graph)
        .filter(Value::is_object)
        .collect()
}

fn expand_graph(item: Value) -> Vec<Value> {
    if let Value::Object(map) = &item {
        if let Some(Value::Array(members)) = map.get("@graph") {
            return members.clone();
        }
    }
    vec![item]
}

fn apply_posting(posting: &JobPosting, record: &mut Record, normalizer: &TextNormalizer) {
    let clean = |raw: &str| normalizer.normalize(&html_to_text(raw));

    let title = posting.title.as_ref().and_then(TextValue::text);
    // The description's headline names the posting; `title` is often just
    // the occupation.
    let name = posting
        .description
        .as_deref()
        .map(|d| clean(first_line(d)))
        .filter(|line| !line.is_empty())
        .or_else(|| title.as_deref().map(&clean));
    if let Some(name) = name {
        record.fill(Field::Name, &name);
    }

    if let Some(price) = posting.base_salary.as_ref().and_then(MonetaryAmount::render) {
        record.fill(Field::Price, &price);
    }

    match posting.address() {
        Some(AddressValue::Text(address)) => {
            record.fill(Field::Address, &clean(address));
        }
        Some(AddressValue::Postal(postal)) => {
            let part = |value: Option<&str>| value.map(&clean).unwrap_or_default();
            let region = part(postal.address_region.as_deref());
            let locality = part(postal.address_locality.as_deref());
            let street = part(postal.street_address.as_deref());

            record.fill(Field::Prefecture, &region);
            record.fill(Field::City, &locality);
            if !street.is_empty() {
                record.fill(Field::Address, &format!("{region}{locality}{street}"));
            }
            record.fill(Field::Area, &format!("{region}{locality}"));
        }
        None => {}
    }

    if let Some(org) = posting.hiring_organization.as_ref().and_then(OrganizationValue::name) {
        record.fill(Field::FacilityName, &clean(org));
    }

    let contract = posting
        .employment_type
        .as_ref()
        .and_then(|types| types.iter().find_map(|t| contract_label(t)));
    if let Some(contract) = contract {
        record.fill(Field::Contract, contract);
    }

    let occupation = posting
        .occupational_category
        .as_ref()
        .and_then(TextValue::text)
        .or(title);
    if let Some(occupation) = occupation {
        record.fill(Field::Occupation, &clean(&occupation));
    }

    let text_fields = [
        (Field::WorkingHours, &posting.work_hours),
        (Field::License, &posting.qualifications),
        (Field::Detail, &posting.responsibilities),
        (Field::WelfareProgram, &posting.job_benefits),
        (Field::RequiredSkill, &posting.experience_requirements),
    ];
    for (field, value) in text_fields {
        if let Some(text) = value.as_ref().and_then(TextValue::text) {
            record.fill(field, &clean(&text));
        }
    }
}

#[cfg(test)]
#[path = "structured_test.rs"]
mod tests;
