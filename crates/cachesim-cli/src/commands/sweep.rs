//! `cachesim sweep` — replay every `.din` trace in a directory, writing
//! one cumulative-energy `.csv` per trace. Grounded on
//! `original_source/monte_carlo.py`'s `SimulationRunner.run`, minus the
//! `multiprocessing.Pool` (spec.md §5: parallelism across independent
//! runs belongs to the driver, not the core; here that's separate CLI
//! invocations, not a worker pool this binary spawns itself) and minus
//! the Monte-Carlo workload generator itself (spec.md §1 Non-goals).

use std::path::{Path, PathBuf};

use cachesim_core::{Hierarchy, HierarchyConfig, Stat};

use super::{GeometryArgs, fail, write_summary_json};

pub struct SweepCommandConfig<'a> {
    pub trace_dir: &'a Path,
    pub output_dir: &'a Path,
    pub geometry: GeometryArgs,
    pub from_filename: bool,
    pub summary_json: bool,
    pub report: bool,
}

pub fn run(config: SweepCommandConfig) {
    std::fs::create_dir_all(config.output_dir).unwrap_or_else(|err| fail(err.into()));

    let mut entries: Vec<PathBuf> = std::fs::read_dir(config.trace_dir)
        .unwrap_or_else(|err| fail(err.into()))
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("din"))
        .collect();
    entries.sort();

    if entries.is_empty() {
        eprintln!("no .din files found in {}", config.trace_dir.display());
        std::process::exit(1);
    }

    let base_associativity = config.geometry.associativity;
    let base_seed = config.geometry.seed;

    for path in &entries {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();

        let hierarchy_config = if config.from_filename {
            match cachesim_core::trace::parse_geometry_from_stem(stem) {
                Some((l1_size, l2_size)) => HierarchyConfig {
                    l1_size,
                    l2_size,
                    associativity: base_associativity,
                    random_seed: base_seed,
                },
                None => {
                    eprintln!(
                        "skipping {}: filename doesn't match <prefix>_<l1_size>_<l2_size>.din",
                        path.display()
                    );
                    continue;
                }
            }
        } else {
            HierarchyConfig {
                l1_size: config.geometry.l1_size,
                l2_size: config.geometry.l2_size,
                associativity: base_associativity,
                random_seed: base_seed,
            }
        };

        let trace = match cachesim_core::trace::read_din(path) {
            Ok(trace) => trace,
            Err(err) => {
                eprintln!("skipping {}: {err}", path.display());
                continue;
            }
        };

        let mut hierarchy = Hierarchy::new(hierarchy_config).unwrap_or_else(|err| fail(err));
        hierarchy.run(&trace);

        if hierarchy.is_empty() {
            eprintln!("skipping {}: contains no trace records", path.display());
            continue;
        }

        let energy = hierarchy.report(Stat::Energy);
        let per_level: [Vec<f64>; 4] = energy.try_into().expect("report always returns 4 series");
        let cumulative = cachesim_core::report::cumulative_energy(&per_level);

        let csv_path = config.output_dir.join(stem).with_extension("csv");
        let text: String = cumulative.iter().map(|v| format!("{v}\n")).collect();
        std::fs::write(&csv_path, text).unwrap_or_else(|err| fail(err.into()));

        println!(
            "{}: {} records -> {}",
            path.display(),
            trace.len(),
            csv_path.display()
        );
        if config.report {
            hierarchy.print_summary();
        }
        if config.summary_json {
            let json_path = config.output_dir.join(stem).with_extension("json");
            write_summary_json(&json_path, &hierarchy);
        }
    }
}
