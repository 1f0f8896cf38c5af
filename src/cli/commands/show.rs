//! Show command implementation.
use super::write_rendered;
use crate::cli::args::OutputArgs;
use arogya::config::Config;
use arogya::store::{FileStore, RecordStore};

pub fn run(
    config: &Config,
    key: &str,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(&config.store_path)?;
    let record = store
        .get(key)?
        .ok_or_else(|| format!("no record found at {}", key))?;

    write_rendered(&record, output)
}
