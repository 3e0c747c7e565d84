//! Label/value table extraction (`<th>`/`<td>` rows, `<dt>`/`<dd>` pairs).

use std::collections::HashMap;

use kyujin_core::{Field, Record, SiteConfig};
use scraper::Html;

use crate::normalize::TextNormalizer;
use crate::selector::{element_text, parse_selector};

/// Built-in label → field dictionary.
pub const DEFAULT_LABELS: &[(&str, Field)] = &[
    ("給与", Field::Price),
    ("施設名", Field::FacilityName),
    ("勤務地", Field::Address),
    ("最寄り駅", Field::Access),
    ("最寄駅", Field::Station),
    ("職種", Field::Occupation),
    ("雇用形態", Field::Contract),
    ("必要な資格", Field::License),
    ("必要な業務経験", Field::RequiredSkill),
    ("仕事内容", Field::Detail),
    ("福利厚生", Field::WelfareProgram),
    ("就業時間", Field::WorkingHours),
    ("勤務形態", Field::WorkingStyle),
    ("休日", Field::Holiday),
    ("施設形態", Field::FacilityType),
    ("診療科目", Field::Dept),
];

/// Canonical form of a label cell: no whitespace, no trailing colon.
fn label_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .trim_end_matches(['：', ':'])
        .to_string()
}

/// The built-in dictionary overlaid with the site's `labels`.
#[must_use]
pub fn label_dictionary(config: &SiteConfig) -> HashMap<String, Field> {
    DEFAULT_LABELS
        .iter()
        .map(|&(label, field)| (label_key(label), field))
        .chain(config.labels.iter().map(|(label, &field)| (label_key(label), field)))
        .collect()
}

/// Walk every configured `label_rows` rule. The first row found for a
/// field wins.
#[must_use]
pub fn extract_labeled_rows(
    document: &Html,
    config: &SiteConfig,
    normalizer: &TextNormalizer,
) -> Record {
    let mut record = Record::default();
    if config.label_rows.is_empty() {
        return record;
    }
    let dictionary = label_dictionary(config);

    for rule in &config.label_rows {
        let (Some(rows), Some(label), Some(value)) = (
            parse_selector(&rule.rows, "label_rows.rows"),
            parse_selector(&rule.label, "label_rows.label"),
            parse_selector(&rule.value, "label_rows.value"),
        ) else {
            continue;
        };

        for row in document.select(&rows) {
            // Pair label and value cells positionally so that one `<dl>`
            // holding several `<dt>`/`<dd>` pairs works as a row.
            for (label_cell, value_cell) in row.select(&label).zip(row.select(&value)) {
                let key = label_key(&element_text(label_cell));
                let Some(&field) = dictionary.get(&key) else {
                    continue;
                };
                record.fill(field, &normalizer.normalize(&element_text(value_cell)));
            }
        }
    }
    record
}
