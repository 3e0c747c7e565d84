//! Field registry and the merger that executes it.
//!
//! Each record field has an ordered chain of sources. A `Fallback` step only
//! fills a field that is still empty; an `Override` step replaces whatever
//! earlier steps produced whenever its own value is non-empty.

use kyujin_core::{Field, Record};

/// Where a candidate value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Embedded `JobPosting` structured data.
    Structured,
    /// `selectors` rules, then configured `extractors`.
    Selector,
    /// `label_rows` tables.
    Labeled,
    /// Description mining.
    Mined,
    /// Document `patterns`.
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Override,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub source: Source,
    pub policy: Policy,
}

const fn step(source: Source, policy: Policy) -> Strategy {
    Strategy { source, policy }
}

/// Chain for the fields where a site's selector beats structured data.
const SELECTOR_AUTHORITATIVE: &[Strategy] = &[
    step(Source::Structured, Policy::Fallback),
    step(Source::Selector, Policy::Override),
    step(Source::Labeled, Policy::Fallback),
    step(Source::Mined, Policy::Fallback),
    step(Source::Pattern, Policy::Fallback),
];

/// Chain for every other field: each source only fills gaps.
const GAP_FILLING: &[Strategy] = &[
    step(Source::Structured, Policy::Fallback),
    step(Source::Selector, Policy::Fallback),
    step(Source::Labeled, Policy::Fallback),
    step(Source::Mined, Policy::Fallback),
    step(Source::Pattern, Policy::Fallback),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub chain: &'static [Strategy],
}

const fn rule(field: Field) -> FieldRule {
    let chain = match field {
        Field::Name | Field::Price => SELECTOR_AUTHORITATIVE,
        _ => GAP_FILLING,
    };
    FieldRule { field, chain }
}

/// One rule per record field, in record order.
pub const FIELD_REGISTRY: [FieldRule; 23] = {
    let mut rules = [rule(Field::Name); 23];
    let mut i = 0;
    while i < Field::ALL.len() {
        rules[i] = rule(Field::ALL[i]);
        i += 1;
    }
    rules
};

/// Per-source candidate records for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceValues {
    pub structured: Record,
    pub selector: Record,
    pub labeled: Record,
    pub mined: Record,
    pub pattern: Record,
}

impl SourceValues {
    #[must_use]
    pub fn get(&self, source: Source) -> &Record {
        match source {
            Source::Structured => &self.structured,
            Source::Selector => &self.selector,
            Source::Labeled => &self.labeled,
            Source::Mined => &self.mined,
            Source::Pattern => &self.pattern,
        }
    }
}

/// Merge with [`FIELD_REGISTRY`].
#[must_use]
pub fn merge(values: &SourceValues) -> Record {
    merge_with(&FIELD_REGISTRY, values)
}

/// Execute `registry` against `values`. Fields without a rule stay empty.
#[must_use]
pub fn merge_with(registry: &[FieldRule], values: &SourceValues) -> Record {
    let mut record = Record::default();
    for rule in registry {
        for strategy in rule.chain {
            let candidate = values.get(strategy.source).get(rule.field);
            if candidate.is_empty() {
                continue;
            }
            match strategy.policy {
                Policy::Override => {
                    if record.is_set(rule.field) {
                        tracing::debug!(
                            field = %rule.field,
                            source = ?strategy.source,
                            "overriding earlier value"
                        );
                    }
                    record.set(rule.field, candidate);
                }
                Policy::Fallback => {
                    record.fill(rule.field, candidate);
                }
            }
        }
    }
    record
}
