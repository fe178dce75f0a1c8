//! N-way set-associative, random-replacement, unified L2 cache.

use crate::access::AccessKind;
use crate::accounting::{Accumulator, LevelParams, Usage};
use crate::dram::Dram;
use crate::line::CacheLine;
use crate::rng::ReplacementRng;

const OFFSET_BITS: u32 = 6; // log2(64-byte block)

/// L2 hardware parameters (spec.md §3): 4.5ns access, 0.8W static,
/// 2.0W dynamic, 5pJ transfer penalty.
fn l2_params() -> LevelParams {
    LevelParams::new(4.5, 0.8, 2.0, 5.0)
}

/// One N-way set-associative L2 cache with random replacement.
pub struct L2Cache {
    pub(crate) acc: Accumulator,
    sets: Vec<Vec<CacheLine>>,
    associativity: usize,
    set_bits: u32,
    rng: ReplacementRng,
}

impl L2Cache {
    pub fn new(num_sets: usize, associativity: usize, seed: Option<u64>) -> Self {
        debug_assert!(num_sets.is_power_of_two());
        debug_assert!(associativity >= 1);
        Self {
            acc: Accumulator::new(l2_params()),
            sets: vec![vec![CacheLine::EMPTY; associativity]; num_sets],
            associativity,
            set_bits: num_sets.trailing_zeros(),
            rng: ReplacementRng::new(seed),
        }
    }

    fn parse_addr(&self, address: u64) -> (usize, u64) {
        let set_index = (address >> OFFSET_BITS) & ((self.sets.len() as u64) - 1);
        let tag = address >> (OFFSET_BITS + self.set_bits);
        (set_index as usize, tag)
    }

    /// Reconstruct the address a `(tag, set_index)` pair refers to.
    pub fn tag_to_addr(&self, tag: u64, set_index: usize) -> u64 {
        (tag << (OFFSET_BITS + self.set_bits)) | ((set_index as u64) << OFFSET_BITS)
    }

    /// Service one access into L2, from either a program reference or a
    /// higher level's write-back (`from_previous`). Returns this call's
    /// delta usage: energy is L2's own delta (including static idle
    /// charged while DRAM worked); time is the full latency of the call,
    /// own probes plus whatever was spent recursively in DRAM. See
    /// module docs on [`crate::accounting`] for why nothing is committed
    /// here.
    pub fn access(&mut self, dram: &mut Dram, kind: AccessKind, address: u64, from_previous: bool) -> Usage {
        let snap = self.acc.snapshot();
        self.acc.charge_transfer();

        let (set_index, tag) = self.parse_addr(address);
        let dirty = kind.is_write() || from_previous;

        if let Some(way) = self.find_way(set_index, tag) {
            if dirty {
                self.sets[set_index][way].set_dirty();
            }
            log::debug!("l2 hit set={set_index} way={way} addr={address:#x}");
            return self.acc.delta_since(snap);
        }

        self.acc.mark_miss();
        log::debug!("l2 miss set={set_index} addr={address:#x}");

        // DRAM's own access_time dwarfs L2's; any sub-access reaching DRAM
        // must have its full latency folded into what this call returns,
        // not just L2's own probe time, or the caller (L1) under-charges
        // itself — and transitively the peer L1 — idle energy for the
        // wait (spec.md §5: "charges static energy for the duration of
        // that deeper access").
        let mut nested_latency = 0.0;

        if let Some(way) = self.find_empty(set_index) {
            self.sets[set_index][way].install(tag, dirty);
        } else {
            let victim = self.rng.victim(self.associativity);
            self.acc.probe(); // victim read
            nested_latency += self.handle_eviction(dram, set_index, victim);
            self.sets[set_index][victim].install(tag, dirty);
        }

        if !from_previous {
            let refill = dram.access(kind, address, true);
            self.acc.idle(refill.time);
            nested_latency += refill.time;
        }

        let mut usage = self.acc.delta_since(snap);
        usage.time += nested_latency;
        usage
    }

    /// Scan the set for a matching tag, charging one probe per way
    /// scanned, stopping at the first match.
    fn find_way(&mut self, set_index: usize, tag: u64) -> Option<usize> {
        for way in 0..self.associativity {
            self.acc.probe();
            if self.sets[set_index][way].matches(tag) {
                return Some(way);
            }
        }
        None
    }

    /// Scan the set for any empty slot, charging one probe per way
    /// scanned.
    fn find_empty(&mut self, set_index: usize) -> Option<usize> {
        for way in 0..self.associativity {
            self.acc.probe();
            if self.sets[set_index][way].is_empty() {
                return Some(way);
            }
        }
        None
    }

    /// Write back the line occupying `(set_index, way)` if dirty, before
    /// that slot is overwritten by random eviction. Returns the
    /// write-back's latency so the caller can fold it into the total
    /// latency it reports upward (0.0 if no write-back occurred).
    fn handle_eviction(&mut self, dram: &mut Dram, set_index: usize, way: usize) -> f64 {
        let victim = self.sets[set_index][way];
        if victim.is_empty() || !victim.is_dirty() {
            return 0.0;
        }
        let addr = self.tag_to_addr(victim.tag().unwrap(), set_index);
        log::debug!("l2 eviction write-back addr={addr:#x}");
        let writeback = dram.access(AccessKind::WriteData, addr, true);
        self.acc.idle(writeback.time);
        writeback.time
    }
}
