//! Process-wide execution runtime.
use anyhow::Result;

/// A process-wide distributed-execution runtime, held for the duration of
/// a run.
///
/// The guard is acquired once, before any policy or environment object is
/// built, and released by dropping it after all such objects are done being
/// used. Implementations release the underlying runtime in [`Drop`] so that
/// release happens on every exit path. Guards are a single matched pair per
/// run: no nesting, no sharing across concurrent runs in one process.
pub trait Runtime: Sized {
    /// Brings up the runtime and returns the guard.
    fn init() -> Result<Self>;
}
