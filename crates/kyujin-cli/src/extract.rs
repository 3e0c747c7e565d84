//! The `extract` command: fetch, decode, extract, write JSON.

use std::path::Path;

use anyhow::Context;
use kyujin_core::{load_site_config_or_default, AppConfig};
use kyujin_extract::fetch::is_remote;
use kyujin_extract::{extract_document, DocumentFetcher, FileFetcher, HttpFetcher};

use crate::configs::resolve_site_id;

/// Extract the job posting at `source` and write it as pretty JSON.
///
/// # Errors
///
/// Returns an error if the document cannot be fetched, is empty, or the
/// output cannot be written. Missing or broken site configs only warn.
pub(crate) async fn run_extract(
    config: &AppConfig,
    config_dir: &Path,
    source: &str,
    output: Option<&Path>,
    site_id: Option<&str>,
) -> anyhow::Result<()> {
    let site_id = site_id.map_or_else(|| resolve_site_id(config_dir, source), str::to_string);
    tracing::info!(source, site_id = %site_id, "extracting job posting");
    let site_config = load_site_config_or_default(config_dir, &site_id);

    let document = if is_remote(source) {
        HttpFetcher::new(config.request_timeout_secs, &config.user_agent)?
            .fetch(source)
            .await
    } else {
        FileFetcher.fetch(source).await
    }
    .with_context(|| format!("failed to fetch {source}"))?;

    let extraction = extract_document(
        &document.bytes,
        &site_config,
        document.charset.as_deref(),
    )
    .with_context(|| format!("failed to extract {source}"))?;
    for diagnostic in &extraction.diagnostics {
        tracing::warn!(source, diagnostic = %diagnostic, "document decoded with problems");
    }

    let json = serde_json::to_string_pretty(&extraction.record)?;
    write_output(output, &json)
}

fn write_output(output: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote record");
        }
        None => println!("{json}"),
    }
    Ok(())
}
