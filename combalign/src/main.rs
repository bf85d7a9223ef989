use anyhow::Result;
use clap::Parser;
use combalign::{inspect, merge};

#[derive(Parser)]
#[command(version, about)]
enum Cli {
    /// Merge the pairwise alignments into one gapped alignment against the reference.
    Merge(merge::Cli),

    /// Show how the insertions of the pairwise alignments are reconciled.
    Inspect(inspect::Cli),
}

fn main() -> Result<()> {
    match Cli::parse() {
        Cli::Merge(cli) => merge::cli(cli),
        Cli::Inspect(cli) => inspect::cli(cli),
    }
}
