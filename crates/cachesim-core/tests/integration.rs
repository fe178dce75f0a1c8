//! Integration tests for cachesim-core: the quantified invariants and
//! round-trip properties of spec.md §8, driven through the public
//! `Hierarchy` API rather than individual level internals.

use cachesim_core::{AccessKind, AccessRecord, Hierarchy, HierarchyConfig, Stat};

fn record(kind: AccessKind, address: u64) -> AccessRecord {
    AccessRecord { kind, address }
}

fn strided_trace(count: u64) -> Vec<AccessRecord> {
    (0..count)
        .map(|i| record(AccessKind::ReadData, (i * 64) % (256 * 64 + 1)))
        .collect()
}

#[test]
fn every_level_series_length_matches_trace_length() {
    let mut hierarchy = Hierarchy::new(HierarchyConfig::default()).unwrap();
    let trace = strided_trace(5000);
    hierarchy.run(&trace);
    for series in hierarchy.report(Stat::Misses) {
        assert_eq!(series.len(), trace.len());
    }
    for series in hierarchy.report(Stat::Accesses) {
        assert_eq!(series.len(), trace.len());
    }
}

#[test]
fn every_energy_and_time_sample_is_non_negative() {
    let mut hierarchy = Hierarchy::new(HierarchyConfig {
        random_seed: Some(1),
        ..Default::default()
    })
    .unwrap();
    hierarchy.run(&strided_trace(8000));
    for series in hierarchy.report(Stat::Energy) {
        assert!(series.iter().all(|&v| v >= 0.0));
    }
    for series in hierarchy.report(Stat::Time) {
        assert!(series.iter().all(|&v| v >= 0.0));
    }
}

#[test]
fn identical_seed_and_trace_yield_bit_identical_series() {
    let trace: Vec<AccessRecord> = (0..3000u64)
        .map(|i| record(AccessKind::WriteData, (i * 64) % (64 * 64)))
        .collect();
    let cfg = HierarchyConfig {
        random_seed: Some(99),
        ..Default::default()
    };

    let mut a = Hierarchy::new(cfg).unwrap();
    let mut b = Hierarchy::new(cfg).unwrap();
    a.run(&trace);
    b.run(&trace);

    for stat in [Stat::Accesses, Stat::Misses, Stat::Energy, Stat::Time] {
        assert_eq!(a.report(stat), b.report(stat));
    }
}

#[test]
fn cold_working_set_smaller_than_l1_has_compulsory_misses_only() {
    // No writes, working set (4 lines) fits entirely in L1: every repeat
    // after the first touch of a line is a hit, so L2/DRAM misses equal
    // the number of distinct lines touched (compulsory misses only).
    let mut hierarchy = Hierarchy::new(HierarchyConfig {
        random_seed: Some(0),
        ..Default::default()
    })
    .unwrap();

    let distinct_lines = 4u64;
    let mut trace = Vec::new();
    for _ in 0..200 {
        for line in 0..distinct_lines {
            trace.push(record(AccessKind::ReadData, line * 64));
        }
    }
    hierarchy.run(&trace);

    let misses = hierarchy.report(Stat::Misses);
    let l2_misses: f64 = misses[2].iter().sum();
    assert_eq!(l2_misses, distinct_lines as f64);

    // DRAM is an always-hit sink (spec.md §1), so its own Misses sum is
    // always zero; what equals the compulsory-miss count is the number
    // of trace records during which DRAM was actually touched — visible
    // as a non-zero committed energy sample (the "Accesses" series
    // itself is a constant-1 list per spec.md §4.6 regardless of touch).
    let dram_touches = hierarchy
        .report(Stat::Energy)[3]
        .iter()
        .filter(|&&e| e > 0.0)
        .count();
    assert_eq!(dram_touches, distinct_lines as usize);

    let l2_accesses: f64 = hierarchy.report(Stat::Accesses)[2].iter().sum();
    assert_eq!(l2_accesses, trace.len() as f64);
}

#[test]
fn l1_misses_lower_bound_l2_accesses_minus_writebacks() {
    let mut hierarchy = Hierarchy::new(HierarchyConfig {
        random_seed: Some(3),
        ..Default::default()
    })
    .unwrap();
    let trace: Vec<AccessRecord> = (0..6000u64)
        .map(|i| {
            let kind = if i % 3 == 0 { AccessKind::WriteData } else { AccessKind::ReadData };
            record(kind, (i * 64) % (64 * 64))
        })
        .collect();
    hierarchy.run(&trace);

    let misses = hierarchy.report(Stat::Misses);
    let l1i_misses: f64 = misses[0].iter().sum();
    let l1d_misses: f64 = misses[1].iter().sum();

    // The reported "Accesses" series is a constant-1 list per level per
    // spec.md §4.6 (one entry per trace record, regardless of whether
    // that level was actually touched), so the real per-record touch
    // count is recovered from a non-zero committed energy sample
    // instead.
    let l2_real_touches = hierarchy
        .report(Stat::Energy)[2]
        .iter()
        .filter(|&&e| e > 0.0)
        .count() as f64;

    // L2 is accessed on every L1 miss and on every dirty eviction's
    // write-back; the write-back accesses are >= 0, so L1 misses alone
    // lower-bound L2 accesses minus those write-backs.
    assert!(l1i_misses + l1d_misses <= l2_real_touches);
}

#[test]
fn default_geometry_matches_spec_line_and_set_counts() {
    let cfg = HierarchyConfig::default();
    assert_eq!(cfg.l1_lines(), 512);
    assert_eq!(cfg.l2_sets(), 1024);
}

#[test]
fn rejects_invalid_configuration_at_construction() {
    let cfg = HierarchyConfig {
        associativity: 0,
        ..Default::default()
    };
    assert!(Hierarchy::new(cfg).is_err());
}

#[test]
fn unknown_report_statistic_is_rejected_at_call_site() {
    use std::str::FromStr;
    assert!(Stat::from_str("Bandwidth").is_err());
}
