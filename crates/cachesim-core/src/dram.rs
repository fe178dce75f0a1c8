//! DRAM sink: an always-hit leaf, contributing one dynamic access per
//! reference that reaches it. Row-buffer locality, refresh, and bus
//! contention are out of scope (spec.md §1 Non-goals).

use crate::access::AccessKind;
use crate::accounting::{Accumulator, LevelParams, Usage};

/// DRAM hardware parameters (spec.md §3): 45ns access, 0.8W static,
/// 4.0W dynamic, 640pJ transfer penalty.
fn dram_params() -> LevelParams {
    LevelParams::new(45.0, 0.8, 4.0, 640.0)
}

pub struct Dram {
    pub(crate) acc: Accumulator,
}

impl Dram {
    pub fn new() -> Self {
        Self {
            acc: Accumulator::new(dram_params()),
        }
    }

    /// Always a hit: one probe, never a miss. `from_previous` and `kind`
    /// are accepted for symmetry with [`crate::l2::L2Cache::access`] but
    /// do not change DRAM's behavior.
    pub fn access(&mut self, kind: AccessKind, address: u64, from_previous: bool) -> Usage {
        let _ = (kind, from_previous);
        let snap = self.acc.snapshot();
        self.acc.charge_transfer();
        self.acc.probe();
        log::debug!("dram access addr={address:#x}");
        self.acc.delta_since(snap)
    }
}

impl Default for Dram {
    fn default() -> Self {
        Self::new()
    }
}
