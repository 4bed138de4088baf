//! `langreg iso639` command: compile the ISO 639-3 code table.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::iso639::compile_table;

/// Options for the iso639 command
#[derive(Debug, Clone, Default)]
pub struct Iso639Options {
    /// Local table file instead of the configured URL
    pub input: Option<PathBuf>,
    /// Output JSON path; stdout when absent
    pub output: Option<PathBuf>,
    /// Never touch the network
    pub offline: bool,
}

/// Execute the iso639 command
pub fn execute_iso639(options: Iso639Options, config: Config) -> Result<()> {
    eprintln!("{} Compiling ISO 639-3 code table...", style("→").cyan());

    let text = super::source_text(
        options.input.as_deref(),
        &config.iso639_url,
        &config,
        options.offline,
    )?;
    let entries = compile_table(&text)?;
    let json = serde_json::to_string_pretty(&entries)?;

    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, json)?;
            eprintln!(
                "{} Code table written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    eprintln!("  Languages: {}", entries.len());

    Ok(())
}
