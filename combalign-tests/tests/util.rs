use std::{env, path::Path};

use anyhow::{Result, anyhow};
use clap::Parser;
use combalign::{inspect, merge};

/// Runs a `combalign` subcommand given as whitespace-separated arguments.
pub fn run_in_repo_root(args: &str) -> Result<()> {
    run_args_in_repo_root(&args.split_whitespace().collect::<Vec<_>>())
}

pub fn run_args_in_repo_root(args: &[&str]) -> Result<()> {
    // the working directory of tests is this crate, the test files are relative to the repo root
    env::set_current_dir(
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .ok_or(anyhow!("No parent directory"))?,
    )?;

    match args.first() {
        Some(&"merge") => merge::cli(merge::Cli::try_parse_from(args)?),
        Some(&"inspect") => inspect::cli(inspect::Cli::try_parse_from(args)?),
        _ => Err(anyhow!("Unknown command: {args:?}")),
    }
}

/// A path in the temporary directory that is unique to the calling test.
pub fn temporary_file(name: &str) -> String {
    env::temp_dir()
        .join(format!("combalign-tests-{}-{name}", std::process::id()))
        .to_string_lossy()
        .into_owned()
}

pub fn read_to_string(path: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|error| anyhow!("Unable to read {path:?}: {error}"))
}
