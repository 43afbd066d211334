//! almanac-map CLI entry point
//!
//! Reads an almanac file and reports the lowest reachable location.

use almanac_map::core::{parse_almanac_file, total_length, Almanac};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

/// How much to print besides the answer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportArg {
    /// Print only the lowest location
    #[default]
    #[value(name = "summary")]
    Summary,
    /// Also print per-seed locations and run statistics
    #[value(name = "verbose")]
    Verbose,
}

#[derive(Parser)]
#[command(name = "almanac-map")]
#[command(about = "Map seed values and seed ranges through almanac tables")]
#[command(version)]
struct Cli {
    /// Number of threads for seed-range mapping
    #[arg(short = 't', long, global = true, default_value = "1")]
    threads: usize,

    /// Report detail: 'summary' or 'verbose'
    #[arg(long, global = true, default_value = "summary")]
    report: ReportArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Treat every seed as a single value
    Seeds {
        /// Almanac file (plain, .gz or .bz2)
        input: PathBuf,
    },
    /// Treat seeds as (start, length) pairs
    Ranges {
        /// Almanac file (plain, .gz or .bz2)
        input: PathBuf,
    },
    /// Run both readings
    All {
        /// Almanac file (plain, .gz or .bz2)
        input: PathBuf,
    },
}

fn load_almanac(input: &PathBuf) -> anyhow::Result<Almanac> {
    let start = Instant::now();
    eprintln!("Loading almanac: {:?}", input);

    let almanac = parse_almanac_file(input)
        .map_err(|e| anyhow::anyhow!("Failed to load almanac: {}", e))?;

    let skipped = almanac.pipeline.skipped_rules();
    if skipped > 0 {
        log::warn!("{} malformed rule line(s) were skipped", skipped);
    }
    eprintln!(
        "Almanac loaded in {:.2}s ({} seeds, {} tables)",
        start.elapsed().as_secs_f64(),
        almanac.seeds.len(),
        almanac.pipeline.len()
    );

    Ok(almanac)
}

fn report_seeds(almanac: &Almanac, report: ReportArg) -> anyhow::Result<()> {
    if report == ReportArg::Verbose {
        for (seed, location) in almanac.seed_locations() {
            println!("Seed {} maps to location {}", seed, location);
        }
    }
    let lowest = almanac.lowest_seed_location()?;
    println!("Lowest location (seeds): {}", lowest);
    Ok(())
}

fn report_ranges(almanac: &Almanac, threads: usize, report: ReportArg) -> anyhow::Result<()> {
    let start = Instant::now();
    let seeds = almanac.seed_intervals()?;
    let locations = almanac.location_ranges(threads)?;
    let lowest = almanac_map::lowest_start(&locations)?;

    if report == ReportArg::Verbose {
        eprintln!("\n=== Range Statistics ===");
        eprintln!("Seed ranges:     {}", seeds.len());
        eprintln!("Seed values:     {}", total_length(&seeds));
        eprintln!("Final ranges:    {}", locations.len());
        eprintln!("Skipped rules:   {}", almanac.pipeline.skipped_rules());
        eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
    }
    println!("Lowest location (ranges): {}", lowest);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Seeds { input } => {
            let almanac = load_almanac(&input)?;
            report_seeds(&almanac, cli.report)?;
        }

        Commands::Ranges { input } => {
            let almanac = load_almanac(&input)?;
            report_ranges(&almanac, cli.threads, cli.report)?;
        }

        Commands::All { input } => {
            let almanac = load_almanac(&input)?;
            report_seeds(&almanac, cli.report)?;
            report_ranges(&almanac, cli.threads, cli.report)?;
        }
    }

    Ok(())
}
