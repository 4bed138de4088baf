//! `langreg registry` command: compile the IANA language subtag
//! registry into typed rows and preferred-value pairs.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::emit::RegistryOutput;
use crate::registry::shared_registry;

/// Options for the registry command
#[derive(Debug, Clone, Default)]
pub struct RegistryOptions {
    /// Local registry file instead of the configured URL
    pub input: Option<PathBuf>,
    /// Output JSON path; stdout when absent
    pub output: Option<PathBuf>,
    /// Never touch the network
    pub offline: bool,
}

/// Execute the registry command
pub fn execute_registry(options: RegistryOptions, config: Config) -> Result<()> {
    eprintln!("{} Compiling language subtag registry...", style("→").cyan());

    let registry = shared_registry(|| {
        super::source_text(
            options.input.as_deref(),
            &config.registry_url,
            &config,
            options.offline,
        )
    })?;

    let output = RegistryOutput::build(registry)?;

    match &options.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            output.write_json(path)?;
            eprintln!(
                "{} Registry written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", output.to_json()?),
    }

    eprintln!("  Extlangs: {}", output.extlangs.len());
    eprintln!("  Variants: {}", output.variants.len());
    eprintln!("  Grandfathered: {}", output.grandfathered.len());
    eprintln!("  Preferred values: {}", output.preferred_values.len());

    Ok(())
}
