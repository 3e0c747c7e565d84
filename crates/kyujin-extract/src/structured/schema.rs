//! Typed view of a schema.org `JobPosting` object.
//!
//! Every field decodes leniently: a key that is missing, `null`, or of an
//! unexpected shape becomes `None` instead of failing the whole posting.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A value that may appear alone or as a JSON array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    // Listed first: a struct also deserializes from a sequence.
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        match self {
            Self::Many(items) => items.iter(),
            Self::One(item) => std::slice::from_ref(item).iter(),
        }
    }
}

/// A free-text property: a string, a list of strings, or a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Many(Vec<String>),
    One(String),
    Number(serde_json::Number),
}

impl TextValue {
    /// Trimmed text, list items joined with `、`. `None` when blank.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text = match self {
            Self::One(s) => s.trim().to_string(),
            Self::Many(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("、"),
            Self::Number(n) => n.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(rename = "@type", deserialize_with = "lenient")]
    pub kind: Option<OneOrMany<String>>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<TextValue>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub base_salary: Option<MonetaryAmount>,
    #[serde(deserialize_with = "lenient")]
    pub job_location: Option<OneOrMany<Place>>,
    #[serde(deserialize_with = "lenient")]
    pub hiring_organization: Option<OrganizationValue>,
    #[serde(deserialize_with = "lenient")]
    pub employment_type: Option<OneOrMany<String>>,
    #[serde(deserialize_with = "lenient")]
    pub occupational_category: Option<TextValue>,
    #[serde(deserialize_with = "lenient")]
    pub work_hours: Option<TextValue>,
    #[serde(deserialize_with = "lenient")]
    pub qualifications: Option<TextValue>,
    #[serde(deserialize_with = "lenient")]
    pub responsibilities: Option<TextValue>,
    #[serde(deserialize_with = "lenient")]
    pub job_benefits: Option<TextValue>,
    #[serde(deserialize_with = "lenient")]
    pub experience_requirements: Option<TextValue>,
}

impl JobPosting {
    /// Whether `@type` names `JobPosting` (alone or among several types).
    #[must_use]
    pub fn is_job_posting(&self) -> bool {
        self.kind
            .as_ref()
            .is_some_and(|kind| kind.iter().any(|t| t.eq_ignore_ascii_case("JobPosting")))
    }

    /// The first location that carries an address.
    #[must_use]
    pub fn address(&self) -> Option<&AddressValue> {
        self.job_location
            .as_ref()?
            .iter()
            .find_map(|place| place.address.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Place {
    #[serde(deserialize_with = "lenient")]
    pub address: Option<AddressValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AddressValue {
    Text(String),
    Postal(PostalAddress),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(deserialize_with = "lenient")]
    pub address_region: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub address_locality: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub street_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrganizationValue {
    Name(String),
    Organization(Organization),
}

impl OrganizationValue {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Self::Name(name) => name.as_str(),
            Self::Organization(org) => org.name.as_deref()?,
        };
        Some(name.trim()).filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Organization {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonetaryAmount {
    #[serde(deserialize_with = "lenient")]
    pub value: Option<SalaryValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SalaryValue {
    Amount(Amount),
    Quantity(QuantitativeValue),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(deserialize_with = "lenient")]
    pub min_value: Option<Amount>,
    #[serde(deserialize_with = "lenient")]
    pub max_value: Option<Amount>,
    #[serde(deserialize_with = "lenient")]
    pub value: Option<Amount>,
    #[serde(deserialize_with = "lenient")]
    pub unit_text: Option<String>,
}

/// A salary bound, given either as a JSON number or as numeric text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Amount {
    /// Display form; whole floats drop their fractional part.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        let rendered = match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Number(n) if n.is_f64() => match n.as_f64() {
                Some(f) if f.fract().abs() < f64::EPSILON => format!("{f:.0}"),
                _ => n.to_string(),
            },
            Self::Number(n) => n.to_string(),
        };
        (!rendered.is_empty()).then_some(rendered)
    }
}

fn salary_prefix(unit_text: Option<&str>) -> &'static str {
    match unit_text.map(|u| u.trim().to_ascii_uppercase()).as_deref() {
        Some("MONTH") => "月給",
        Some("DAY") => "日給",
        Some("HOUR") => "時給",
        _ => "年収",
    }
}

impl MonetaryAmount {
    /// Human-readable salary such as `年収 4000000〜6000000円`.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self.value.as_ref()? {
            SalaryValue::Amount(amount) => {
                let value = amount.render()?;
                Some(format!("{} {value}円", salary_prefix(None)))
            }
            SalaryValue::Quantity(quantity) => quantity.render(),
        }
    }
}

impl QuantitativeValue {
    fn render(&self) -> Option<String> {
        let prefix = salary_prefix(self.unit_text.as_deref());
        let min = self.min_value.as_ref().and_then(Amount::render);
        let max = self.max_value.as_ref().and_then(Amount::render);
        match (min, max) {
            (Some(min), Some(max)) => Some(format!("{prefix} {min}〜{max}円")),
            (Some(min), None) => Some(format!("{prefix} {min}円〜")),
            (None, Some(max)) => Some(format!("{prefix} 〜{max}円")),
            (None, None) => {
                let value = self.value.as_ref().and_then(Amount::render)?;
                Some(format!("{prefix} {value}円"))
            }
        }
    }
}

/// Localized contract label for a schema.org `employmentType` value.
#[must_use]
pub fn contract_label(employment_type: &str) -> Option<&'static str> {
    let normalized = employment_type
        .trim()
        .to_ascii_uppercase()
        .replace(['-', ' '], "_");
    match normalized.as_str() {
        "FULL_TIME" => Some("正社員(常勤)"),
        "PART_TIME" => Some("非常勤"),
        "CONTRACT" | "CONTRACTOR" => Some("契約社員"),
        _ => None,
    }
}
