//! URL → site-config identifier resolution.

/// Identifier returned when no known domain matches.
pub const DEFAULT_SITE_ID: &str = "default";

/// Built-in `(domain substring, site id)` table, tested in order.
pub const KNOWN_SITES: &[(&str, &str)] = &[
    ("kirara-support.jp", "kirara-support"),
    ("kyujiner.com", "kyujiner"),
    ("cme-pharmacist.jp", "cme-pharmacist"),
    ("th-agent.jp", "th-agent"),
    ("nursepower.co.jp", "nursepower"),
    ("nursejj.com", "nursejj"),
    ("yakumatch.com", "yakumatch"),
    ("supernurse.co.jp", "supernurse"),
    ("mc-nurse.net", "mc-nurse"),
    ("benesse-mcm.jp", "benesse-mcm"),
    ("kango-oshigoto.jp", "kango-oshigoto"),
];

/// A domain hint harvested from a loaded site config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDomain {
    pub domain: String,
    pub id: String,
}

/// Resolve `url` against [`KNOWN_SITES`].
#[must_use]
pub fn resolve_site(url: &str) -> &'static str {
    KNOWN_SITES
        .iter()
        .find(|&&(domain, _)| url.contains(domain))
        .map_or(DEFAULT_SITE_ID, |&(_, id)| id)
}

/// Resolve `url` against [`KNOWN_SITES`], then against `extra` in order.
#[must_use]
pub fn resolve_site_with(url: &str, extra: &[SiteDomain]) -> String {
    let builtin = resolve_site(url);
    if builtin != DEFAULT_SITE_ID {
        return builtin.to_string();
    }
    extra
        .iter()
        .find(|site| !site.domain.is_empty() && url.contains(site.domain.as_str()))
        .map_or_else(|| DEFAULT_SITE_ID.to_string(), |site| site.id.clone())
}
