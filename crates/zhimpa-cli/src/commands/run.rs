use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use zhimpa_application::Command;
use zhimpa_core::config::SiteConfig;
use zhimpa_core::page::Page;

use super::{Site, print_activation, print_outcome};

/// Runs every command in `script`, one JSON object per line.
///
/// Blank lines and lines starting with `#` are skipped. The first line that
/// fails to parse stops the run.
pub fn execute(config: SiteConfig, script: &Path, page: &str) -> Result<()> {
    let source = fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;

    let mut site = Site::open(config)?;
    let activation = site.dispatcher.load(Page::from_path(page))?;
    print_activation(&site.dispatcher, &activation);
    site.settle()?;

    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command: Command = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: invalid command", script.display(), index + 1))?;
        let outcome = site.dispatcher.dispatch(command);
        print_outcome(&outcome);
        site.settle()?;
    }

    Ok(())
}
