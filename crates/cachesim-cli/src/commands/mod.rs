pub mod run;
pub mod sweep;

use cachesim_core::{CacheSimError, Hierarchy, HierarchyConfig};

/// Geometry/seed flags shared by the `run` and `sweep` subcommands,
/// assembled into a [`HierarchyConfig`] and validated at construction.
pub struct GeometryArgs {
    pub l1_size: usize,
    pub l2_size: usize,
    pub associativity: usize,
    pub seed: Option<u64>,
}

impl GeometryArgs {
    pub fn into_config(self) -> HierarchyConfig {
        HierarchyConfig {
            l1_size: self.l1_size,
            l2_size: self.l2_size,
            associativity: self.associativity,
            random_seed: self.seed,
        }
    }
}

/// Print a `CacheSimError` to stderr and exit the process with status 1.
/// Every error in `cachesim_core::error::CacheSimError` is fatal to the
/// run in progress (spec.md §7): there is nothing partial to salvage.
pub fn fail(err: CacheSimError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}

/// Write `hierarchy.summary()` to `path` as pretty-printed JSON, the way
/// the teacher's CLI writes machine-readable reports
/// (`openentropy-cli/src/commands/analyze.rs`'s
/// `serde_json::to_string_pretty` + `std::fs::write`).
pub fn write_summary_json(path: &std::path::Path, hierarchy: &Hierarchy) {
    let text = serde_json::to_string_pretty(&hierarchy.summary()).expect("summary JSON is always serializable");
    std::fs::write(path, text).unwrap_or_else(|err| fail(err.into()));
}
