use anyhow::{Context, Result};
use gtfs_graph::ReaderConfig;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads the loader settings from a JSON file
pub fn read_config(path: &Path) -> Result<ReaderConfig> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    parse_config(BufReader::new(file)).with_context(|| format!("invalid configuration {}", path.display()))
}

pub fn parse_config<R: std::io::Read>(reader: R) -> Result<ReaderConfig> {
    Ok(serde_json::from_reader(reader)?)
}
