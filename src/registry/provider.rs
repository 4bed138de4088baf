//! Process-wide memoized registry.
//!
//! The fetch-and-parse sequence is expensive (network I/O), so it runs
//! at most once per process: the first caller computes, concurrent
//! first-callers block behind that computation, and every caller after
//! that receives the same immutable reference without locking.

use once_cell::sync::OnceCell;

use crate::error::Result;
use crate::registry::Registry;

static SHARED: OnceCell<Registry> = OnceCell::new();

/// Fetch and parse the registry exactly once per process.
///
/// `fetch` supplies the raw registry text; it is only invoked if no
/// cached registry exists yet. A failed fetch leaves the cell empty, so
/// a later call may retry.
pub fn shared_registry<F>(fetch: F) -> Result<&'static Registry>
where
    F: FnOnce() -> Result<String>,
{
    SHARED.get_or_try_init(|| {
        let text = fetch()?;
        Ok(Registry::parse(&text))
    })
}
