//! Reporting surface: turns committed per-access series into the four
//! ordered per-level series a cache-design sweep plots.

use serde::{Deserialize, Serialize};

use crate::error::{CacheSimError, Result};

/// Fixed reporting order, used throughout `report()` and the CLI.
pub const LEVEL_NAMES: [&str; 4] = ["L1-I", "L1-D", "L2", "DRAM"];

/// Canonical per-level misses/hits/energy summary, serializable for the
/// CLI's `--summary-json` output — mirrors the per-source measurement
/// records this corpus otherwise builds by hand from raw series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelSummary {
    pub level: &'static str,
    pub misses: u64,
    pub hits: u64,
    pub energy_joules: f64,
}

/// Canonical whole-hierarchy summary: one [`LevelSummary`] per level, in
/// [`LEVEL_NAMES`] order, plus the total energy across all four.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HierarchySummary {
    pub levels: Vec<LevelSummary>,
    pub total_energy_joules: f64,
}

/// A statistic `report()` can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Accesses,
    Misses,
    Energy,
    Time,
}

impl std::str::FromStr for Stat {
    type Err = CacheSimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Accesses" => Ok(Self::Accesses),
            "Misses" => Ok(Self::Misses),
            "Energy" => Ok(Self::Energy),
            "Time" => Ok(Self::Time),
            other => Err(CacheSimError::UnknownStat(other.to_string())),
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Accesses => "Accesses",
            Self::Misses => "Misses",
            Self::Energy => "Energy",
            Self::Time => "Time",
        };
        write!(f, "{name}")
    }
}

/// Cumulative sum across a series, used for plotting and for the
/// cumulative-energy `.csv` output.
pub fn cumulative(series: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    series
        .iter()
        .map(|v| {
            total += v;
            total
        })
        .collect()
}

/// Build a [`HierarchySummary`] from the raw `Misses`/`Energy` series of
/// all four levels, in [`LEVEL_NAMES`] order.
pub fn summarize(misses: &[Vec<f64>], energy: &[Vec<f64>]) -> HierarchySummary {
    let mut total_energy_joules = 0.0;
    let levels = LEVEL_NAMES
        .iter()
        .zip(misses.iter().zip(energy.iter()))
        .map(|(&level, (level_misses, level_energy))| {
            let miss_count = level_misses.iter().sum::<f64>() as u64;
            let hits = level_misses.len() as u64 - miss_count;
            let energy_joules = level_energy.iter().sum::<f64>();
            total_energy_joules += energy_joules;
            LevelSummary {
                level,
                misses: miss_count,
                hits,
                energy_joules,
            }
        })
        .collect();
    HierarchySummary {
        levels,
        total_energy_joules,
    }
}

/// Sum of per-access total energy across all four levels, index-aligned
/// by trace record — the series the `.csv` output format cumulatively
/// sums (spec.md §6).
pub fn total_energy_per_access(per_level_energy: &[Vec<f64>; 4]) -> Vec<f64> {
    let len = per_level_energy[0].len();
    (0..len)
        .map(|i| per_level_energy.iter().map(|series| series[i]).sum())
        .collect()
}

/// The cumulative-energy `.csv` output format (spec.md §6): one float per
/// line, the running sum across the trace of total energy (all four
/// levels) up to and including record `i`. Mirrors
/// `original_source/monte_carlo.py`'s `SimulationRunner.single_test`:
/// `np.cumsum(np.sum(sim_out.report('Energy'), axis=0))`.
pub fn cumulative_energy(per_level_energy: &[Vec<f64>; 4]) -> Vec<f64> {
    cumulative(&total_energy_per_access(per_level_energy))
}
