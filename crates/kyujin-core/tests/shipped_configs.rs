//! Every site config shipped under `configs/sites` must load cleanly.

use std::path::PathBuf;

use kyujin_core::{list_site_configs, load_site_config, resolve_site, DEFAULT_SITE_ID};

fn shipped_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/sites")
}

#[test]
fn shipped_configs_parse_without_problems() {
    let entries = list_site_configs(&shipped_dir()).unwrap();
    assert!(!entries.is_empty());
    for entry in &entries {
        assert!(entry.problem.is_none(), "{}: {:?}", entry.id, entry.problem);
        let config = load_site_config(&shipped_dir(), &entry.id).unwrap();
        assert!(
            config.unknown_field_keys().is_empty(),
            "{} names unknown fields",
            entry.id
        );
    }
}

#[test]
fn shipped_domains_resolve_to_their_config() {
    for entry in list_site_configs(&shipped_dir()).unwrap() {
        let Some(domain) = entry.domain else {
            continue;
        };
        let url = format!("https://{domain}/job/1");
        assert_eq!(resolve_site(&url), entry.id, "{url}");
    }
}

#[test]
fn default_config_is_shipped() {
    let config = load_site_config(&shipped_dir(), DEFAULT_SITE_ID).unwrap();
    assert!(config.selectors.is_empty());
    assert!(config.extractors.is_empty());
}
