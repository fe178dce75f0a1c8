//! # cachesim-core
//!
//! Trace-driven simulator for a split-L1/unified-L2/DRAM cache hierarchy.
//! Computes, for every memory reference in an input trace, the access
//! latency and the energy consumed at every level — the accounting model
//! that attributes dynamic energy (spent while a level is active) and
//! static energy (spent while a level is idle but powered) across levels
//! that operate partly in parallel and partly serially is the part worth
//! getting right; a textbook hit/miss counter is not.
//!
//! ## Quick start
//!
//! ```
//! use cachesim_core::{AccessKind, AccessRecord, HierarchyConfig, Hierarchy, Stat};
//!
//! let mut hierarchy = Hierarchy::new(HierarchyConfig {
//!     random_seed: Some(0),
//!     ..Default::default()
//! }).unwrap();
//!
//! hierarchy.access(AccessRecord { kind: AccessKind::ReadData, address: 0x1000 });
//! let misses = hierarchy.report(Stat::Misses);
//! assert_eq!(misses.len(), 4); // [L1-I, L1-D, L2, DRAM]
//! ```
//!
//! ## Architecture
//!
//! Trace record → [`orchestrator::Hierarchy`] → active [`l1::L1Cache`] →
//! shared [`l2::L2Cache`] → [`dram::Dram`]. Every level owns an
//! [`accounting::Accumulator`]; [`orchestrator::Hierarchy::access`]
//! commits exactly one sample per level per trace record, which is what
//! keeps the four per-level series the same length as the trace
//! regardless of how many times a level was actually probed.

pub mod access;
pub mod accounting;
pub mod config;
pub mod dram;
pub mod error;
pub mod l1;
pub mod l2;
pub mod line;
pub mod orchestrator;
pub mod report;
pub mod rng;
pub mod trace;

pub use access::{AccessKind, AccessRecord};
pub use config::HierarchyConfig;
pub use error::{CacheSimError, Result};
pub use orchestrator::Hierarchy;
pub use report::Stat;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
