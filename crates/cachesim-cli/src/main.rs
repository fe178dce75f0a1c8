//! CLI driver for cachesim — sweep cache geometries across benchmark
//! traces and print or export per-level energy/time statistics.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::GeometryArgs;

#[derive(Parser)]
#[command(name = "cachesim")]
#[command(about = "trace-driven energy/time simulator for a split-L1/L2/DRAM cache hierarchy")]
#[command(version = cachesim_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay one `.din` trace through a single hierarchy geometry.
    Run {
        /// Path to the `.din` trace file.
        tracefile: PathBuf,

        /// Per-L1 capacity in bytes; must be a power-of-two multiple of 64.
        #[arg(long, default_value_t = cachesim_core::config::DEFAULT_L1_SIZE)]
        l1_size: usize,

        /// L2 capacity in bytes; must equal block * associativity * power_of_two.
        #[arg(long, default_value_t = cachesim_core::config::DEFAULT_L2_SIZE)]
        l2_size: usize,

        /// L2 associativity (ways).
        #[arg(long, default_value_t = cachesim_core::config::DEFAULT_ASSOCIATIVITY)]
        associativity: usize,

        /// Seed the L2 replacement RNG for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the cumulative-energy series to this `.csv` path.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write a per-level misses/hits/energy summary as JSON to this path.
        #[arg(long)]
        summary_json: Option<PathBuf>,

        /// Print a per-level misses/hits/energy summary after the run.
        #[arg(long)]
        report: bool,
    },

    /// Replay every `.din` trace in a directory, writing one
    /// cumulative-energy `.csv` per trace — a cache-geometry sweep.
    Sweep {
        /// Directory containing `.din` trace files.
        trace_dir: PathBuf,

        /// Directory to write per-trace `.csv` output into.
        #[arg(long, default_value = "sweep_out")]
        output_dir: PathBuf,

        /// Per-L1 capacity in bytes, used unless `--from-filename` is set.
        #[arg(long, default_value_t = cachesim_core::config::DEFAULT_L1_SIZE)]
        l1_size: usize,

        /// L2 capacity in bytes, used unless `--from-filename` is set.
        #[arg(long, default_value_t = cachesim_core::config::DEFAULT_L2_SIZE)]
        l2_size: usize,

        /// L2 associativity (ways), applied to every trace in the sweep.
        #[arg(long, default_value_t = cachesim_core::config::DEFAULT_ASSOCIATIVITY)]
        associativity: usize,

        /// Seed the L2 replacement RNG for every run in the sweep.
        #[arg(long)]
        seed: Option<u64>,

        /// Derive each file's `l1_size`/`l2_size` from its
        /// `<prefix>_<l1_size>_<l2_size>.din` filename instead of the
        /// `--l1-size`/`--l2-size` flags.
        #[arg(long)]
        from_filename: bool,

        /// Print a per-level summary after each trace in the sweep.
        #[arg(long)]
        report: bool,

        /// Write a per-trace per-level summary as `<stem>.json` alongside each `.csv`.
        #[arg(long)]
        summary_json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            tracefile,
            l1_size,
            l2_size,
            associativity,
            seed,
            output,
            summary_json,
            report,
        } => commands::run::run(commands::run::RunCommandConfig {
            tracefile: &tracefile,
            geometry: GeometryArgs {
                l1_size,
                l2_size,
                associativity,
                seed,
            },
            output_csv: output.as_deref(),
            summary_json: summary_json.as_deref(),
            report,
        }),
        Commands::Sweep {
            trace_dir,
            output_dir,
            l1_size,
            l2_size,
            associativity,
            seed,
            from_filename,
            report,
            summary_json,
        } => commands::sweep::run(commands::sweep::SweepCommandConfig {
            trace_dir: &trace_dir,
            output_dir: &output_dir,
            geometry: GeometryArgs {
                l1_size,
                l2_size,
                associativity,
                seed,
            },
            from_filename,
            summary_json,
            report,
        }),
    }
}
