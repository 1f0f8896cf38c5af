//! Summarize command implementation.
use super::write_rendered;
use crate::cli::args::OutputArgs;
use arogya::config::Config;
use arogya::summary::SummaryClient;
use std::path::PathBuf;

pub fn run(
    config: &Config,
    documents: &[PathBuf],
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = SummaryClient::new(config.summary_endpoint.clone());
    eprintln!(
        "Uploading {} report(s) to {}",
        documents.len(),
        client.endpoint()
    );

    let rt = tokio::runtime::Runtime::new()?;
    let summary = rt.block_on(client.summarize(documents))?;

    eprintln!("Reports uploaded successfully");
    write_rendered(&summary, output)
}
