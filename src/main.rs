mod configuration;

use anyhow::{Context, Result};
use clap::Parser;
use gtfs_graph::{EntityType, Gtfs, GtfsReader, LoadSummary, ReaderConfig};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Loads GTFS feeds into one store, merging their agencies and identifiers
#[derive(Parser, Debug)]
#[command(name = "gtfs-load")]
struct Args {
    /// JSON file with the reader settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of the statistics
    #[arg(long)]
    json: bool,

    /// Zip archives or directories, loaded in this order
    #[arg(required = true)]
    feeds: Vec<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    feeds: &'a [LoadSummary],
    totals: BTreeMap<EntityType, usize>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => configuration::read_config(path)?,
        None => ReaderConfig::default(),
    };
    let mut reader = GtfsReader::from_config(&config)?;

    // every feed goes into the same store, sharing the agencies and ids already read
    let mut gtfs = Gtfs::default();
    let mut summaries = Vec::new();
    for feed in &args.feeds {
        info!("Loading schedules for {}", feed.display());
        let summary = reader
            .load_path(feed, &mut gtfs)
            .with_context(|| format!("cannot load {}", feed.display()))?;
        gtfs.read_duration += summary.read_duration;
        summaries.push(summary);
    }

    if args.json {
        let totals = EntityType::LOAD_ORDER
            .iter()
            .map(|t| (*t, gtfs.count(*t)))
            .collect();
        let report = Report {
            feeds: &summaries,
            totals,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        gtfs.print_stats();
        let agencies: Vec<String> = reader.agencies().iter().map(|a| a.to_string()).collect();
        println!("  Agencies: {}", agencies.join(", "));
    }
    Ok(())
}
