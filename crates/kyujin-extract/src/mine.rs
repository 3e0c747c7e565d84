//! Keyword and label mining over free-text job descriptions.
//!
//! Each rule fills its field only when the field is still empty, so mining
//! several descriptions in order keeps the first hit.

use std::sync::LazyLock;

use kyujin_core::{Field, Record};
use regex::Regex;

use crate::normalize::TextNormalizer;

const NIGHT_SHIFT_PHRASES: &[&str] = &["夜勤あり", "夜勤有"];

/// Ward assignments, checked in order.
const POSITIONS: &[&str] = &["病棟", "外来", "手術室"];

/// `(spellings, label)` shift patterns, checked in order.
const SHIFT_PATTERNS: &[(&[&str], &str)] = &[
    (&["2交替", "二交替", "２交替"], "2交替"),
    (&["3交替", "三交替", "３交替"], "3交替"),
];

static DEPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"診療科目[：:]\s*([^\n]+)").expect("valid dept regex"));
static FACILITY_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"施設形態[：:]\s*([^\n]+)").expect("valid facility-type regex"));

/// Contract label implied by `text`.
///
/// "常勤" is tested before "非常勤"; since the latter contains the former,
/// a text mentioning only 非常勤 still yields the full-time label.
fn contract(text: &str) -> Option<&'static str> {
    if text.contains("常勤") {
        if NIGHT_SHIFT_PHRASES.iter().any(|p| text.contains(p)) {
            Some("正社員(常勤・夜勤有り)")
        } else {
            Some("正社員(常勤)")
        }
    } else if text.contains("非常勤") {
        Some("非常勤")
    } else if text.contains("正社員") {
        Some("正社員")
    } else {
        None
    }
}

fn position(text: &str) -> Option<&'static str> {
    POSITIONS.iter().copied().find(|p| text.contains(p))
}

fn working_style(text: &str) -> Option<&'static str> {
    SHIFT_PATTERNS
        .iter()
        .find(|(spellings, _)| spellings.iter().any(|s| text.contains(s)))
        .map(|&(_, label)| label)
}

fn labeled(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Mine `text` into the empty fields of `record`.
pub fn mine_description(text: &str, record: &mut Record, normalizer: &TextNormalizer) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(label) = contract(text) {
        record.fill(Field::Contract, label);
    }
    if let Some(label) = position(text) {
        record.fill(Field::Position, label);
    }
    if let Some(dept) = labeled(&DEPT_RE, text) {
        record.fill(Field::Dept, &normalizer.normalize(&dept));
    }
    if let Some(kind) = labeled(&FACILITY_TYPE_RE, text) {
        record.fill(Field::FacilityType, &normalizer.normalize(&kind));
    }
    if let Some(label) = working_style(text) {
        record.fill(Field::WorkingStyle, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine(text: &str) -> Record {
        let mut record = Record::default();
        mine_description(text, &mut record, &TextNormalizer::default());
        record
    }

    #[test]
    fn full_time_with_night_shift() {
        assert_eq!(mine("常勤募集。夜勤ありの病棟勤務").contract, "正社員(常勤・夜勤有り)");
        assert_eq!(mine("常勤（夜勤有）").contract, "正社員(常勤・夜勤有り)");
    }

    #[test]
    fn full_time_without_night_shift() {
        assert_eq!(mine("常勤・日勤のみ").contract, "正社員(常勤)");
    }

    #[test]
    fn part_time_text_matches_full_time_rule_first() {
        // 非常勤 contains 常勤; the first rule already matches.
        assert_eq!(mine("非常勤スタッフ募集").contract, "正社員(常勤)");
    }

    #[test]
    fn plain_regular_employee() {
        assert_eq!(mine("正社員として採用").contract, "正社員");
        assert_eq!(mine("アルバイト").contract, "");
    }

    #[test]
    fn position_priority() {
        assert_eq!(mine("外来と病棟の兼務").position, "病棟");
        assert_eq!(mine("外来・手術室").position, "外来");
        assert_eq!(mine("手術室看護師").position, "手術室");
        assert_eq!(mine("訪問看護").position, "");
    }

    #[test]
    fn labeled_department_and_facility_type() {
        let record = mine("診療科目：内科・外科  \n施設形態: 急性期病院\n");
        assert_eq!(record.dept, "内科・外科");
        assert_eq!(record.facility_type, "急性期病院");
    }

    #[test]
    fn shift_patterns() {
        assert_eq!(mine("二交替制").working_style, "2交替");
        assert_eq!(mine("３交替").working_style, "3交替");
        assert_eq!(mine("2交替または3交替").working_style, "2交替");
        assert_eq!(mine("日勤のみ").working_style, "");
    }

    #[test]
    fn never_overwrites_existing_values() {
        let mut record = Record::default();
        record.set(Field::Contract, "契約社員");
        record.set(Field::Position, "外来");
        mine_description("常勤 病棟", &mut record, &TextNormalizer::default());
        assert_eq!(record.contract, "契約社員");
        assert_eq!(record.position, "外来");
    }

    #[test]
    fn first_description_wins() {
        let mut record = Record::default();
        let normalizer = TextNormalizer::default();
        mine_description("外来勤務", &mut record, &normalizer);
        mine_description("病棟勤務 2交替", &mut record, &normalizer);
        assert_eq!(record.position, "外来");
        assert_eq!(record.working_style, "2交替");
    }
}
