//! Hierarchy configuration surface and construction-time validation.
//!
//! Geometry is expressed in bytes, the way a cache-design sweep script
//! would specify it, and is validated once here rather than scattered
//! across [`crate::l1::L1Cache`] / [`crate::l2::L2Cache`] construction.

use crate::error::{CacheSimError, Result};

/// Cache block size in bytes, shared by every level. Not exposed as a
/// config knob — spec.md's External Interfaces only names
/// `l1_size`/`l2_size`/`associativity`/`random_seed`.
pub const BLOCK_SIZE: usize = 64;

/// Default L1 size: 32 KiB.
pub const DEFAULT_L1_SIZE: usize = 32 * 1024;

/// Default L2 size: 256 KiB.
pub const DEFAULT_L2_SIZE: usize = 256 * 1024;

/// Default L2 associativity.
pub const DEFAULT_ASSOCIATIVITY: usize = 4;

/// Configuration for a [`crate::orchestrator::Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyConfig {
    /// Total per-L1 capacity in bytes. Must be a power-of-two multiple of
    /// [`BLOCK_SIZE`] (direct-mapped: one line per block).
    pub l1_size: usize,
    /// Total L2 capacity in bytes. Must equal
    /// `BLOCK_SIZE * associativity * power_of_two`.
    pub l2_size: usize,
    /// L2 ways. Must be at least 1.
    pub associativity: usize,
    /// Seed for the L2 replacement RNG. `None` means nondeterministic
    /// (seeded from OS entropy).
    pub random_seed: Option<u64>,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            l1_size: DEFAULT_L1_SIZE,
            l2_size: DEFAULT_L2_SIZE,
            associativity: DEFAULT_ASSOCIATIVITY,
            random_seed: None,
        }
    }
}

impl HierarchyConfig {
    /// Number of direct-mapped lines in L1.
    pub fn l1_lines(&self) -> usize {
        self.l1_size / BLOCK_SIZE
    }

    /// Number of sets in L2.
    pub fn l2_sets(&self) -> usize {
        self.l2_size / (BLOCK_SIZE * self.associativity)
    }

    /// Validate geometry invariants, returning the same config on success.
    ///
    /// Rejects: non-power-of-two L1 line count, zero associativity, L2
    /// size not evenly divisible by `BLOCK_SIZE * associativity`, or a
    /// non-power-of-two L2 set count.
    pub fn validate(self) -> Result<Self> {
        if self.associativity == 0 {
            return Err(CacheSimError::InvalidConfig(
                "associativity must be at least 1".into(),
            ));
        }
        if self.l1_size == 0 || self.l1_size % BLOCK_SIZE != 0 {
            return Err(CacheSimError::InvalidConfig(format!(
                "l1_size {} must be a multiple of the {}-byte block size",
                self.l1_size, BLOCK_SIZE
            )));
        }
        let l1_lines = self.l1_lines();
        if !l1_lines.is_power_of_two() {
            return Err(CacheSimError::InvalidConfig(format!(
                "l1_size {} implies {} lines, which is not a power of two",
                self.l1_size, l1_lines
            )));
        }

        let set_bytes = BLOCK_SIZE * self.associativity;
        if self.l2_size == 0 || self.l2_size % set_bytes != 0 {
            return Err(CacheSimError::InvalidConfig(format!(
                "l2_size {} is not divisible by block * associativity ({})",
                self.l2_size, set_bytes
            )));
        }
        let l2_sets = self.l2_sets();
        if !l2_sets.is_power_of_two() {
            return Err(CacheSimError::InvalidConfig(format!(
                "l2_size {} implies {} sets, which is not a power of two",
                self.l2_size, l2_sets
            )));
        }

        log::info!(
            "hierarchy configured: l1={}B ({} lines), l2={}B ({} sets x {}-way), seed={:?}",
            self.l1_size,
            l1_lines,
            self.l2_size,
            l2_sets,
            self.associativity,
            self.random_seed
        );
        Ok(self)
    }
}
