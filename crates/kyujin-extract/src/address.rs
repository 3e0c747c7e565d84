//! Prefecture / city decomposition of Japanese addresses.

use std::sync::LazyLock;

use kyujin_core::{Field, Record};
use regex::Regex;

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^〒?\s*\d{3}-?\d{4}\s*").expect("valid postal-code regex"));
// 京都府 is the one prefecture whose name contains a suffix character.
static PREFECTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(京都府|[^都道府県\s]{2,3}[都道府県])").expect("valid prefecture regex")
});
static CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?[市区町村])").expect("valid city regex"));

/// Municipalities with a suffix character inside the name, which the lazy
/// city match would cut short (東村山市 → 東村).
const CITIES_WITH_INNER_SUFFIX: &[&str] = &[
    "武蔵村山市",
    "東村山市",
    "羽村市",
    "大村市",
    "田村市",
    "四日市市",
    "廿日市市",
    "野々市市",
    "大町市",
    "十日町市",
];

/// `(prefecture, city)` at the start of `address`.
#[must_use]
pub fn split_address(address: &str) -> (Option<&str>, Option<&str>) {
    let address = address.trim();
    let address = POSTAL_CODE_RE
        .find(address)
        .map_or(address, |m| &address[m.end()..]);
    let Some(prefecture) = PREFECTURE_RE.captures(address).and_then(|caps| caps.get(1)) else {
        return (None, None);
    };
    let rest = address[prefecture.end()..].trim_start();
    let city = CITIES_WITH_INNER_SUFFIX
        .iter()
        .find(|city| rest.starts_with(**city))
        .map(|city| &rest[..city.len()])
        .or_else(|| CITY_RE.captures(rest).and_then(|caps| caps.get(1)).map(|m| m.as_str()));
    (Some(prefecture.as_str()), city)
}

/// Refine `prefecture`, `city` and `area` from `address`. When no address
/// is known, `area` is copied into `address` and used instead.
pub fn decompose_address(record: &mut Record) {
    if record.address.is_empty() {
        let area = record.area.clone();
        record.set(Field::Address, area);
    }
    let input = record.address.clone();
    if input.is_empty() {
        return;
    }

    let (prefecture, city) = split_address(&input);
    if let Some(prefecture) = prefecture {
        record.set(Field::Prefecture, prefecture);
    }
    if let Some(city) = city {
        record.set(Field::City, city);
    }

    if record.area.is_empty() && !record.prefecture.is_empty() && !record.city.is_empty() {
        let area = format!("{}{}", record.prefecture, record.city);
        record.set(Field::Area, area);
    }
}
