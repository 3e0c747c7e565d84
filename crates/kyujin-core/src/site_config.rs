//! Per-site extraction rules and their JSON loader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::Field;
use crate::sites::DEFAULT_SITE_ID;
use crate::ConfigError;

/// Extraction rules for one site. Immutable once loaded.
///
/// Every key is optional: a config with no `selectors` and no `extractors`
/// means structured-data and description-only extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    /// Substring of the site's URLs, used by the site resolver.
    pub domain: String,
    /// Declared source encoding (`shift_jis`, `euc-jp`, ...). Empty means UTF-8.
    pub encoding: String,
    /// Field → regex over the visible document text; last fallback tier.
    pub patterns: BTreeMap<String, String>,
    /// Field → CSS selector.
    pub selectors: BTreeMap<String, String>,
    pub extractors: BTreeMap<String, ExtractorSpec>,
    pub label_rows: Vec<LabelRowRule>,
    /// Extra or overriding label → field entries for labeled-row extraction.
    pub labels: BTreeMap<String, Field>,
    /// Extra boilerplate phrases stripped by the text normalizer.
    pub boilerplate: Vec<String>,
}

impl SiteConfig {
    /// The empty configuration used when no site config can be loaded.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            name: DEFAULT_SITE_ID.to_string(),
            ..Self::default()
        }
    }

    /// Non-empty selector rule configured for `field`.
    #[must_use]
    pub fn selector_for(&self, field: Field) -> Option<&str> {
        non_empty(self.selectors.get(field.as_str()).map(String::as_str))
    }

    /// Extractor spec configured for `field`, if its `value` is non-empty.
    #[must_use]
    pub fn extractor_for(&self, field: Field) -> Option<&ExtractorSpec> {
        self.extractors
            .get(field.as_str())
            .filter(|spec| !spec.value.trim().is_empty())
    }

    /// Non-empty document pattern configured for `field`.
    #[must_use]
    pub fn pattern_for(&self, field: Field) -> Option<&str> {
        non_empty(self.patterns.get(field.as_str()).map(String::as_str))
    }

    /// Keys in `selectors`, `extractors` and `patterns` that name no record field.
    #[must_use]
    pub fn unknown_field_keys(&self) -> Vec<&str> {
        self.selectors
            .keys()
            .chain(self.extractors.keys())
            .chain(self.patterns.keys())
            .map(String::as_str)
            .filter(|key| key.parse::<Field>().is_err())
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// How an [`ExtractorSpec`] locates its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    /// CSS selector against the parsed document.
    #[default]
    Selector,
    /// Regex against the decoded document source.
    Regex,
    /// Dot path into a job-posting structured-data object.
    #[serde(alias = "json-ld", alias = "jsonld")]
    Structured,
}

/// A field's extraction rule beyond a plain selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSpec {
    #[serde(rename = "type")]
    pub kind: ExtractorKind,
    pub value: String,
    /// `text` (default), `html`, or an attribute name. Selector kind only.
    #[serde(rename = "attr", alias = "attribute")]
    pub attribute: String,
    /// Which match to use; 0 is the first.
    #[serde(rename = "index", alias = "matchIndex")]
    pub match_index: usize,
}

/// Selectors describing a label/value table such as `<th>`/`<td>` rows or
/// `<dt>`/`<dd>` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRowRule {
    /// Selector for each row container.
    pub rows: String,
    /// Selector, relative to a row, for the label cell.
    pub label: String,
    /// Selector, relative to a row, for the value cell.
    pub value: String,
}

/// One entry of a site-config directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfigEntry {
    pub id: String,
    pub domain: Option<String>,
    /// Set when the file could not be read or parsed.
    pub problem: Option<String>,
}

/// Parse a site config from its JSON text.
///
/// # Errors
///
/// Returns the underlying `serde_json::Error` for malformed JSON or
/// mistyped keys.
pub fn parse_site_config(json: &str) -> Result<SiteConfig, serde_json::Error> {
    serde_json::from_str(json)
}

fn site_config_path(dir: &Path, site_id: &str) -> Result<PathBuf, ConfigError> {
    if site_id.is_empty()
        || site_id.contains(['/', '\\'])
        || site_id.starts_with('.')
    {
        return Err(ConfigError::Validation(format!(
            "invalid site id '{site_id}'"
        )));
    }
    Ok(dir.join(format!("{site_id}.json")))
}

/// Load `<dir>/<site_id>.json`.
///
/// # Errors
///
/// Returns `ConfigError` if the id is not a plain file stem, or the file
/// cannot be read or parsed.
pub fn load_site_config(dir: &Path, site_id: &str) -> Result<SiteConfig, ConfigError> {
    let path = site_config_path(dir, site_id)?;
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::SiteConfigIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config = parse_site_config(&content).map_err(|e| ConfigError::SiteConfigParse {
        path: path.display().to_string(),
        source: e,
    })?;

    for key in config.unknown_field_keys() {
        tracing::warn!(site_id, key, "site config names an unknown field; ignoring");
    }

    Ok(config)
}

/// Load a site config, falling back to [`SiteConfig::generic`] with a warning.
#[must_use]
pub fn load_site_config_or_default(dir: &Path, site_id: &str) -> SiteConfig {
    match load_site_config(dir, site_id) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                site_id,
                error = %e,
                "could not load site config, using generic extraction"
            );
            SiteConfig::generic()
        }
    }
}

/// List every `*.json` site config in `dir`, sorted by id.
///
/// Files that cannot be read or parsed are still listed, with `problem` set.
///
/// # Errors
///
/// Returns [`ConfigError::ConfigDirIo`] if the directory cannot be read.
pub fn list_site_configs(dir: &Path) -> Result<Vec<SiteConfigEntry>, ConfigError> {
    let dir_err = |e| ConfigError::ConfigDirIo {
        path: dir.display().to_string(),
        source: e,
    };

    let mut entries = Vec::new();
    for dir_entry in std::fs::read_dir(dir).map_err(dir_err)? {
        let path = dir_entry.map_err(dir_err)?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let entry = match std::fs::read_to_string(&path) {
            Err(e) => SiteConfigEntry {
                id: id.to_string(),
                domain: None,
                problem: Some(format!("error reading config: {e}")),
            },
            Ok(content) => match parse_site_config(&content) {
                Err(e) => SiteConfigEntry {
                    id: id.to_string(),
                    domain: None,
                    problem: Some(format!("error parsing config: {e}")),
                },
                Ok(config) => SiteConfigEntry {
                    id: id.to_string(),
                    domain: Some(config.domain).filter(|d| !d.is_empty()),
                    problem: None,
                },
            },
        };
        entries.push(entry);
    }

    entries.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(entries)
}

#[cfg(test)]
#[path = "site_config_test.rs"]
mod tests;
