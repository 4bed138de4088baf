#![forbid(unsafe_code)]

//! # langreg
//!
//! Compiler for the IANA language subtag registry and the ISO 639-3
//! code table.
//!
//! Two independent pipelines share an emission contract:
//!
//! - **Registry**: the semi-structured registry text is parsed into
//!   typed, bucketed records, projected into fixed-shape rows for the
//!   `extlang`/`variant`/`grandfathered` buckets, and resolved into
//!   deterministically ordered preferred-value construction pairs.
//! - **ISO 639-3**: the tab-delimited code table is filtered to
//!   constructed/living/special languages and projected into code
//!   entries, with the reserved private-use block synthesized
//!   explicitly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use langreg::{shared_registry, Fetcher, RegistryOutput};
//! use langreg::fetch::IANA_REGISTRY_URL;
//!
//! fn main() -> anyhow::Result<()> {
//!     let fetcher = Fetcher::new("/tmp/langreg-cache", 7, false);
//!     let registry = shared_registry(|| fetcher.fetch(IANA_REGISTRY_URL))?;
//!     let output = RegistryOutput::build(registry)?;
//!     println!("{}", output.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod iso639;
pub mod preferred;
pub mod registry;

// Re-exports
pub use config::Config;
pub use emit::{RegistryOutput, SubtagRow};
pub use error::{RegistryError, Result};
pub use fetch::Fetcher;
pub use iso639::{compile_table, Iso639Entry};
pub use preferred::{resolve_preferred_values, PreferredValuePair, TagConstruction};
pub use registry::{parse_registry, shared_registry, Registry, RegistryRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
