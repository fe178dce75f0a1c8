//! `cachesim run` — replay a single `.din` trace through one hierarchy
//! geometry and optionally emit the cumulative-energy `.csv` series and
//! a per-level summary report.

use std::path::Path;

use cachesim_core::{Hierarchy, Stat};

use super::{GeometryArgs, fail, write_summary_json};

pub struct RunCommandConfig<'a> {
    pub tracefile: &'a Path,
    pub geometry: GeometryArgs,
    pub output_csv: Option<&'a Path>,
    pub summary_json: Option<&'a Path>,
    pub report: bool,
}

pub fn run(config: RunCommandConfig) {
    let trace = cachesim_core::trace::read_din(config.tracefile).unwrap_or_else(|err| fail(err));
    log::info!(
        "loaded {} records from {}",
        trace.len(),
        config.tracefile.display()
    );

    let hierarchy_config = config.geometry.into_config();
    let mut hierarchy = Hierarchy::new(hierarchy_config).unwrap_or_else(|err| fail(err));
    hierarchy.run(&trace);

    if hierarchy.is_empty() {
        eprintln!("warning: {} contains no trace records", config.tracefile.display());
    }

    if let Some(csv_path) = config.output_csv {
        let energy = hierarchy.report(Stat::Energy);
        let per_level: [Vec<f64>; 4] = energy.try_into().expect("report always returns 4 series");
        let cumulative = cachesim_core::report::cumulative_energy(&per_level);
        let text: String = cumulative.iter().map(|v| format!("{v}\n")).collect();
        std::fs::write(csv_path, text).unwrap_or_else(|err| fail(err.into()));
        println!("wrote {} cumulative-energy samples to {}", cumulative.len(), csv_path.display());
    }

    if config.report {
        hierarchy.print_summary();
    }

    if let Some(path) = config.summary_json {
        write_summary_json(path, &hierarchy);
        println!("wrote summary to {}", path.display());
    }
}
