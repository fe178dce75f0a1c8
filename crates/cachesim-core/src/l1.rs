//! Direct-mapped, write-back, write-allocate L1 cache.
//!
//! One instance backs instruction fetches, a second backs data
//! references; both share the same [`crate::l2::L2Cache`], passed in by
//! mutable reference rather than stored as a field (spec.md §9: "each L1
//! holds a non-owning handle to L2" — modelled here as a borrow scoped to
//! the call, not a stored reference, so ownership stays tree-shaped and
//! the orchestrator alone owns L2 and DRAM).

use crate::access::AccessKind;
use crate::accounting::{Accumulator, LevelParams, Usage};
use crate::dram::Dram;
use crate::l2::L2Cache;
use crate::line::CacheLine;

const OFFSET_BITS: u32 = 6; // log2(64-byte block)

/// L1 hardware parameters (spec.md §3): 0.05ns access, 0.5W static,
/// 1.0W dynamic, no transfer penalty.
fn l1_params() -> LevelParams {
    LevelParams::new(0.05, 0.5, 1.0, 0.0)
}

/// One direct-mapped L1 cache of `lines` 64-byte blocks.
pub struct L1Cache {
    pub(crate) acc: Accumulator,
    lines: Vec<CacheLine>,
    index_bits: u32,
}

impl L1Cache {
    pub fn new(num_lines: usize) -> Self {
        debug_assert!(num_lines.is_power_of_two());
        Self {
            acc: Accumulator::new(l1_params()),
            lines: vec![CacheLine::EMPTY; num_lines],
            index_bits: num_lines.trailing_zeros(),
        }
    }

    fn parse_addr(&self, address: u64) -> (usize, u64) {
        let index = (address >> OFFSET_BITS) & ((self.lines.len() as u64) - 1);
        let tag = address >> (OFFSET_BITS + self.index_bits);
        (index as usize, tag)
    }

    /// Reconstruct the address a `(tag, index)` pair refers to. Used when
    /// writing back an evicted line.
    pub fn tag_to_addr(&self, tag: u64, index: usize) -> u64 {
        (tag << (OFFSET_BITS + self.index_bits)) | ((index as u64) << OFFSET_BITS)
    }

    /// Service one trace-record access. Mutates this L1's own scratch and,
    /// on a miss or dirty eviction, L2's (and transitively DRAM's)
    /// scratch as well — none of which are committed here; the
    /// orchestrator commits every level exactly once per trace record.
    ///
    /// Returns this call's delta usage: energy is this L1's own delta
    /// (including static idle charged while a lower level worked); time
    /// is the full latency of the call, own probes plus whatever was
    /// spent recursively in L2/DRAM. The orchestrator charges the peer
    /// L1 idle for exactly that returned time.
    pub fn access(&mut self, l2: &mut L2Cache, dram: &mut Dram, kind: AccessKind, address: u64) -> Usage {
        let snap = self.acc.snapshot();
        let (index, tag) = self.parse_addr(address);

        self.acc.probe(); // tag read

        // As in L2 (see its module comment), a miss's returned latency
        // must fold in whatever the lower hierarchy spent, recursively
        // down to DRAM if it got that far — not just L2's own probe
        // time — or this L1's idle charge to itself, and in turn the
        // peer L1's idle charge, under-counts the real wait.
        let mut nested_latency = 0.0;

        if self.lines[index].matches(tag) {
            if kind.is_write() {
                self.lines[index].set_dirty();
            }
            log::debug!("l1 hit kind={kind} addr={address:#x} index={index}");
        } else {
            log::debug!("l1 miss kind={kind} addr={address:#x} index={index}");
            self.acc.mark_miss();
            nested_latency += self.handle_eviction(l2, dram, index);
            self.lines[index].install(tag, kind.is_write());

            let refill = l2.access(dram, kind, address, false);
            self.acc.idle(refill.time);
            nested_latency += refill.time;

            if kind.is_write() {
                self.acc.probe(); // write into the newly allocated line
            }
        }

        let mut usage = self.acc.delta_since(snap);
        usage.time += nested_latency;
        usage
    }

    /// Write back the line occupying `index` if it holds a dirty tag,
    /// before that slot is overwritten. Returns the write-back's latency
    /// (0.0 if no write-back occurred), folded by the caller into the
    /// total latency it reports upward.
    fn handle_eviction(&mut self, l2: &mut L2Cache, dram: &mut Dram, index: usize) -> f64 {
        let victim = self.lines[index];
        if victim.is_empty() || !victim.is_dirty() {
            return 0.0;
        }
        let addr = self.tag_to_addr(victim.tag().unwrap(), index);
        log::debug!("l1 eviction write-back addr={addr:#x}");
        let writeback = l2.access(dram, AccessKind::WriteData, addr, true);
        self.acc.idle(writeback.time);
        writeback.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HierarchyConfig;

    fn fresh() -> (L1Cache, L2Cache, Dram) {
        let cfg = HierarchyConfig::default();
        (
            L1Cache::new(cfg.l1_lines()),
            L2Cache::new(cfg.l2_sets(), cfg.associativity, None),
            Dram::new(),
        )
    }

    #[test]
    fn tag_to_addr_round_trips_parse_addr() {
        let (l1, _, _) = fresh();
        for tag in [0u64, 1, 12345] {
            for index in [0usize, 1, 511] {
                let addr = l1.tag_to_addr(tag, index);
                let (got_index, got_tag) = l1.parse_addr(addr);
                assert_eq!(got_index, index);
                assert_eq!(got_tag, tag);
            }
        }
    }

    #[test]
    fn cold_read_is_a_miss_and_charges_energy() {
        let (mut l1, mut l2, mut dram) = fresh();
        let usage = l1.access(&mut l2, &mut dram, AccessKind::ReadData, 0x0);
        assert!(usage.energy > 0.0);
        assert_eq!(l1.acc.series().len(), 0); // not committed yet
    }

    #[test]
    fn repeated_read_same_line_hits_after_first() {
        let (mut l1, mut l2, mut dram) = fresh();
        l1.access(&mut l2, &mut dram, AccessKind::ReadData, 0x0);
        for _ in 0..1023 {
            l1.access(&mut l2, &mut dram, AccessKind::ReadData, 0x0);
            l1.acc.commit();
        }
        // Only the first access should have marked a miss; commits after
        // that all reflect hits.
        let misses: usize = l1.acc.series().misses().iter().map(|&m| m as usize).sum();
        assert_eq!(misses, 0);
    }

    #[test]
    fn empty_slot_eviction_never_writes_back() {
        let (mut l1, mut l2, mut dram) = fresh();
        // address 0 maps to index 0, currently EMPTY: no write-back should occur.
        l1.access(&mut l2, &mut dram, AccessKind::ReadData, 0x0);
        l1.acc.commit();
        l2.acc.commit();
        // Exactly one L2 access should have happened (the refill), not two.
        assert_eq!(l2.acc.series().len(), 1);
    }

    #[test]
    fn cold_miss_latency_includes_the_full_l2_and_dram_chain() {
        // A cold read reaching all the way to DRAM must report a latency
        // that folds in every level's own access_time along the way, not
        // just L1's own tag-probe time, since this value is what the
        // orchestrator uses to charge the peer L1 idle energy.
        let (mut l1, mut l2, mut dram) = fresh();
        let usage = l1.access(&mut l2, &mut dram, AccessKind::ReadData, 0x0);

        let l1_time = l1.acc.params().access_time;
        let l2_time = l2.acc.params().access_time;
        let dram_time = dram.acc.params().access_time;
        let associativity = 4; // default config

        // One L1 tag-read probe; in L2, a full associative scan finding
        // no match (`associativity` probes) followed by a second scan
        // that finds the first way empty (1 probe); one DRAM probe for
        // the refill.
        let l2_probes = associativity + 1;
        let expected = l1_time + (l2_probes as f64) * l2_time + dram_time;
        assert!(
            (usage.time - expected).abs() < 1e-18,
            "expected latency {expected}, got {}",
            usage.time
        );
    }
}
