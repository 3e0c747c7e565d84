//! Site-config listing and URL → config id resolution for the CLI.

use std::path::Path;

use kyujin_core::{list_site_configs, resolve_site_with, SiteConfigEntry, SiteDomain};

/// Domain hints from every readable config in `dir`.
///
/// An unreadable directory yields no hints; the built-in table still applies.
pub(crate) fn site_domains(dir: &Path) -> Vec<SiteDomain> {
    match list_site_configs(dir) {
        Ok(entries) => entries
            .into_iter()
            .filter_map(|entry| {
                Some(SiteDomain {
                    domain: entry.domain?,
                    id: entry.id,
                })
            })
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "no site-config domain hints available");
            Vec::new()
        }
    }
}

/// Built-in domains first, then domains declared by configs in `dir`.
pub(crate) fn resolve_site_id(dir: &Path, url: &str) -> String {
    resolve_site_with(url, &site_domains(dir))
}

/// One `list-configs` output line.
pub(crate) fn format_entry(entry: &SiteConfigEntry) -> String {
    match (&entry.problem, &entry.domain) {
        (Some(problem), _) => format!("{:<20} ({problem})", entry.id),
        (None, Some(domain)) => format!("{:<20} - {domain}", entry.id),
        (None, None) => format!("{:<20} - no domain specified", entry.id),
    }
}

/// Print every site config in `dir`, sorted by id.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read.
pub(crate) fn run_list_configs(dir: &Path) -> anyhow::Result<()> {
    let entries = list_site_configs(dir)?;

    println!("Available site configs ({})", dir.display());
    println!();
    if entries.is_empty() {
        println!("(none)");
    }
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    println!();
    println!("Usage: kyujin-cli extract --config <id> <url>");
    Ok(())
}
