//! Error taxonomy for the cache hierarchy simulator.
//!
//! Every failure mode is fatal to the run in progress: a malformed trace
//! record aborts the whole replay (no partial statistics), an invalid
//! geometry is rejected before a [`crate::orchestrator::Hierarchy`] is ever
//! built, and an unrecognised report statistic is rejected at the call
//! site. There is no recoverable per-access error.

use thiserror::Error;

/// Errors produced while configuring, driving, or reporting on a hierarchy.
#[derive(Debug, Error)]
pub enum CacheSimError {
    /// A `.din` trace line could not be decoded.
    #[error("malformed trace record at line {line}: {text:?}")]
    MalformedTrace { line: usize, text: String },

    /// A geometry or associativity parameter violates the hierarchy's
    /// construction invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `report()` was called with a statistic name outside
    /// `Accesses|Misses|Energy|Time`.
    #[error("unknown report statistic: {0:?}")]
    UnknownStat(String),

    /// Trace or output file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CacheSimError>;
