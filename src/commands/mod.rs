//! CLI command implementations.
//!
//! One submodule per subcommand, each exposing an `Options` struct and
//! an `execute_*` entry point.

pub mod iso639;
pub mod registry;

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::Fetcher;

pub use iso639::{execute_iso639, Iso639Options};
pub use registry::{execute_registry, RegistryOptions};

/// Obtain a source document: a local file when `--input` was given,
/// otherwise the configured URL through the caching fetcher.
pub(crate) fn source_text(
    input: Option<&Path>,
    url: &str,
    config: &Config,
    offline: bool,
) -> Result<String> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Fetcher::new(&config.cache_dir, config.cache_max_age_days, offline).fetch(url),
    }
}
