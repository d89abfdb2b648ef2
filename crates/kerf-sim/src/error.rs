//! Simulation errors.

use thiserror::Error;

/// Errors from building simulation structures.
///
/// Usage-contract violations (querying an index before `finalize`,
/// inserting after it) are caller bugs and panic instead; see the
/// individual index types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A move references a tool number missing from the tool table.
    #[error("move references unknown tool {0}")]
    UnknownTool(u32),
}
