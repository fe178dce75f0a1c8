//! Hierarchy orchestrator: owns L2 and DRAM outright and dispatches each
//! trace record to the right L1, driving the peer-idle accounting that
//! keeps every level's per-access series the same length as the trace.

use crate::access::{AccessKind, AccessRecord};
use crate::config::HierarchyConfig;
use crate::dram::Dram;
use crate::error::Result;
use crate::l1::L1Cache;
use crate::l2::L2Cache;
use crate::report::Stat;

/// The full two-level cache hierarchy: split L1 I/D, shared L2, DRAM.
pub struct Hierarchy {
    icache: L1Cache,
    dcache: L1Cache,
    l2: L2Cache,
    dram: Dram,
    accesses: usize,
}

impl Hierarchy {
    /// Build a hierarchy from a validated configuration.
    pub fn new(config: HierarchyConfig) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            icache: L1Cache::new(config.l1_lines()),
            dcache: L1Cache::new(config.l1_lines()),
            l2: L2Cache::new(config.l2_sets(), config.associativity, config.random_seed),
            dram: Dram::new(),
            accesses: 0,
        })
    }

    /// Service one trace record: dispatch to the matching L1, charge the
    /// other L1 static idle for the duration the active one was busy,
    /// and commit exactly one sample to every one of the four levels.
    ///
    /// The idle charge to the peer does not propagate further down:
    /// L2 and DRAM have already accounted for their own busy time while
    /// servicing the active L1's access, if they were touched at all
    /// (spec.md §4.5 step 4).
    pub fn access(&mut self, record: AccessRecord) {
        let is_inst = record.kind.is_instruction();
        let (active, peer): (&mut L1Cache, &mut L1Cache) = if is_inst {
            (&mut self.icache, &mut self.dcache)
        } else {
            (&mut self.dcache, &mut self.icache)
        };

        let active_delta = active.access(&mut self.l2, &mut self.dram, record.kind, record.address);
        peer.acc.idle(active_delta.time);

        active.acc.commit();
        peer.acc.commit();
        self.l2.acc.commit();
        self.dram.acc.commit();

        self.accesses += 1;
    }

    /// Replay an entire trace in order.
    pub fn run(&mut self, trace: &[AccessRecord]) {
        for record in trace {
            self.access(*record);
        }
    }

    /// Number of trace records processed so far.
    pub fn len(&self) -> usize {
        self.accesses
    }

    pub fn is_empty(&self) -> bool {
        self.accesses == 0
    }

    /// Return the four per-level series for `stat`, in the fixed order
    /// `[L1-I, L1-D, L2, DRAM]`.
    pub fn report(&self, stat: Stat) -> Vec<Vec<f64>> {
        let series = [
            self.icache.acc.series(),
            self.dcache.acc.series(),
            self.l2.acc.series(),
            self.dram.acc.series(),
        ];
        series
            .into_iter()
            .map(|s| match stat {
                Stat::Accesses => s.accesses().into_iter().map(f64::from).collect(),
                Stat::Misses => s.misses().iter().map(|&m| f64::from(m)).collect(),
                Stat::Energy => s.energy().to_vec(),
                Stat::Time => s.time().to_vec(),
            })
            .collect()
    }

    /// Canonical per-level misses/hits/energy summary, as
    /// [`crate::report::HierarchySummary`] — the serializable form the
    /// CLI's `--summary-json` writes to disk.
    pub fn summary(&self) -> crate::report::HierarchySummary {
        crate::report::summarize(&self.report(Stat::Misses), &self.report(Stat::Energy))
    }

    /// Print the per-level summary `original_source/mem.py`'s
    /// `Memory.report()` prints: misses, hits, energy per level, plus
    /// the grand total.
    pub fn print_summary(&self) {
        println!("Accesses: {}", self.len());
        let summary = self.summary();
        for level in &summary.levels {
            println!("{} Misses: {}", level.level, level.misses);
            println!("{} Hits: {}", level.level, level.hits);
            println!("{} Energy: {}", level.level, level.energy_joules);
        }
        println!("Total energy consumed: {}", summary.total_energy_joules);
    }
}
